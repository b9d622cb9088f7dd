use rand::seq::SliceRandom;
use rand::Rng;
use std::f64::consts::TAU;
use std::time::SystemTime;

const BUBBLE_GLYPHS: [char; 5] = ['°', 'o', '∘', '·', 'O'];
const AMBIENT_BUBBLES: usize = 24;
const DT: f64 = 0.1;

/// One bubble drifting around the dial
#[derive(Debug, Clone)]
pub struct Bubble {
    pub x: f64,
    pub y: f64,
    pub vel_x: f64,
    pub vel_y: f64,
    pub symbol: char,
    pub color_index: usize,
    pub age: f64,
    pub max_age: f64,
    pub converging: bool, // part of the reward ring closing in on the center
    pub target_x: f64,
    pub target_y: f64,
}

impl Bubble {
    fn rising(x: f64, y: f64) -> Self {
        let mut rng = rand::thread_rng();

        Self {
            x,
            y,
            vel_x: rng.gen_range(-0.6..0.6),
            vel_y: rng.gen_range(-2.5..-0.8),
            symbol: *BUBBLE_GLYPHS.choose(&mut rng).unwrap_or(&'o'),
            color_index: rng.gen_range(0..4),
            age: 0.0,
            max_age: rng.gen_range(1.5..3.5),
            converging: false,
            target_x: x,
            target_y: y,
        }
    }

    fn converging(x: f64, y: f64, target_x: f64, target_y: f64) -> Self {
        let mut rng = rand::thread_rng();

        Self {
            x,
            y,
            vel_x: (target_x - x) * 1.2,
            vel_y: (target_y - y) * 1.2,
            symbol: *BUBBLE_GLYPHS.choose(&mut rng).unwrap_or(&'o'),
            color_index: rng.gen_range(0..4),
            age: 0.0,
            max_age: rng.gen_range(2.0..3.0),
            converging: true,
            target_x,
            target_y,
        }
    }

    fn update(&mut self, dt: f64) -> bool {
        if self.converging {
            let dist = ((self.target_x - self.x).powi(2) + (self.target_y - self.y).powi(2)).sqrt();
            if dist > 1.0 {
                self.x += self.vel_x * dt;
                self.y += self.vel_y * dt;
                self.vel_x *= 0.95;
                self.vel_y *= 0.95;
            } else {
                // popped at the center
                return false;
            }
        } else {
            // buoyancy with a little sideways wobble
            self.x += self.vel_x * dt + (self.age * 4.0).sin() * 0.05;
            self.y += self.vel_y * dt;
            self.vel_y -= 0.5 * dt;
        }

        self.age += dt;
        self.age < self.max_age
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BubbleMode {
    Off,
    /// Continuous bubbles rising from a ring around the dial.
    Ambient,
    /// One-shot ring closing in on the reward.
    Burst,
}

/// Bubble animation drawn over the timer screen
#[derive(Debug)]
pub struct BubbleField {
    pub bubbles: Vec<Bubble>,
    pub mode: BubbleMode,
    pub reward: Option<String>,
    pub start_time: SystemTime,
    pub burst_duration: f64, // seconds
    pub width: f64,
    pub height: f64,
}

impl BubbleField {
    pub fn new() -> Self {
        Self {
            bubbles: Vec::new(),
            mode: BubbleMode::Off,
            reward: None,
            start_time: SystemTime::now(),
            burst_duration: 3.0,
            width: 80.0,
            height: 24.0,
        }
    }

    pub fn is_active(&self) -> bool {
        self.mode != BubbleMode::Off
    }

    fn center(&self) -> (f64, f64) {
        (self.width / 2.0, self.height / 2.0)
    }

    fn ring_radius(&self) -> f64 {
        (self.height / 2.0 - 2.0).clamp(2.0, 10.0)
    }

    pub fn start_ambient(&mut self, width: u16, height: u16) {
        self.bubbles.clear();
        self.reward = None;
        self.mode = BubbleMode::Ambient;
        self.start_time = SystemTime::now();
        self.width = width as f64;
        self.height = height as f64;
        while self.bubbles.len() < AMBIENT_BUBBLES {
            self.spawn_on_ring();
        }
    }

    pub fn burst(&mut self, reward: &str, width: u16, height: u16) {
        let mut rng = rand::thread_rng();

        self.bubbles.clear();
        self.reward = Some(reward.to_string());
        self.mode = BubbleMode::Burst;
        self.start_time = SystemTime::now();
        self.width = width as f64;
        self.height = height as f64;

        let (cx, cy) = self.center();
        let radius = self.ring_radius() * 2.0;
        for i in 0..32 {
            let angle = TAU * i as f64 / 32.0 + rng.gen_range(-0.1..0.1);
            // terminal cells are roughly twice as tall as wide
            let x = cx + angle.cos() * radius * 2.0;
            let y = cy + angle.sin() * radius;
            self.bubbles.push(Bubble::converging(x, y, cx, cy));
        }
    }

    pub fn stop(&mut self) {
        self.mode = BubbleMode::Off;
        self.bubbles.clear();
        self.reward = None;
    }

    fn spawn_on_ring(&mut self) {
        let mut rng = rand::thread_rng();
        let (cx, cy) = self.center();
        let radius = self.ring_radius();
        let angle = rng.gen_range(0.0..TAU);
        self.bubbles.push(Bubble::rising(
            cx + angle.cos() * radius * 2.0,
            cy + angle.sin() * radius,
        ));
    }

    pub fn update(&mut self) {
        match self.mode {
            BubbleMode::Off => return,
            BubbleMode::Burst => {
                let elapsed = self.start_time.elapsed().unwrap_or_default().as_secs_f64();
                if elapsed >= self.burst_duration {
                    self.stop();
                    return;
                }
            }
            BubbleMode::Ambient => {}
        }

        let (width, height) = (self.width, self.height);
        self.bubbles.retain_mut(|bubble| {
            let alive = bubble.update(DT);
            let off_screen = bubble.y < -1.0 || bubble.x < -1.0 || bubble.x > width + 1.0 || bubble.y > height + 1.0;
            alive && !off_screen
        });

        if self.mode == BubbleMode::Ambient {
            while self.bubbles.len() < AMBIENT_BUBBLES {
                self.spawn_on_ring();
            }
        }
    }
}

impl Default for BubbleField {
    fn default() -> Self {
        Self::new()
    }
}

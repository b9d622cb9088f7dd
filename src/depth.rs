//! Visual cues for a dive in progress: the backdrop darkens from deep grey
//! towards black and the depth gauge sinks to 1000 m as the countdown runs.

const SURFACE_RGB: (f64, f64, f64) = (0.20, 0.25, 0.35);
const ABYSS_RGB: (f64, f64, f64) = (0.02, 0.02, 0.05);

pub const MAX_DEPTH_METERS: u32 = 1000;

/// Backdrop color for a countdown `progress` in `0.0..=1.0`.
pub fn background_rgb(progress: f64) -> (u8, u8, u8) {
    let p = progress.clamp(0.0, 1.0);
    let lerp = |start: f64, end: f64| ((start * (1.0 - p) + end * p) * 255.0).round() as u8;

    (
        lerp(SURFACE_RGB.0, ABYSS_RGB.0),
        lerp(SURFACE_RGB.1, ABYSS_RGB.1),
        lerp(SURFACE_RGB.2, ABYSS_RGB.2),
    )
}

pub fn depth_meters(progress: f64) -> u32 {
    (progress.clamp(0.0, 1.0) * MAX_DEPTH_METERS as f64).floor() as u32
}

pub fn format_hms(total_secs: u64) -> String {
    let h = total_secs / 3600;
    let m = (total_secs % 3600) / 60;
    let s = total_secs % 60;
    format!("{h:02}:{m:02}:{s:02}")
}

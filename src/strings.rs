use crate::prompts::{Category, Language};

pub struct TypingLabels {
    pub placeholder: &'static str,
    pub consonants: &'static str,
    pub vowels: &'static str,
    pub words: &'static str,
    pub sentences: &'static str,
    pub paragraphs: &'static str,
    pub accuracy: &'static str,
    pub cpm: &'static str,
    pub seconds: &'static str,
    pub next: &'static str,
    pub ready: &'static str,
    pub legend: &'static str,
}

impl TypingLabels {
    pub fn category(&self, category: Category) -> &'static str {
        match category {
            Category::Consonants => self.consonants,
            Category::Vowels => self.vowels,
            Category::Words => self.words,
            Category::Sentences => self.sentences,
            Category::Paragraphs => self.paragraphs,
        }
    }
}

pub struct TimerLabels {
    pub title: &'static str,
    pub hours: &'static str,
    pub minutes: &'static str,
    pub seconds: &'static str,
    pub start: &'static str,
    pub pause: &'static str,
    pub resume: &'static str,
    pub cancel: &'static str,
    pub collection: &'static str,
    pub collection_empty: &'static str,
    pub depth: &'static str,
    pub reward_title: &'static str,
    pub reward_body: &'static str,
    pub confirm: &'static str,
    pub setting_legend: &'static str,
}

static KOREAN_TYPING: TypingLabels = TypingLabels {
    placeholder: "입력하려면 타이핑을 시작하세요...",
    consonants: "자음",
    vowels: "모음",
    words: "낱말",
    sentences: "단문",
    paragraphs: "장문",
    accuracy: "정확도",
    cpm: "타수",
    seconds: "시간",
    next: "다음",
    ready: "Enter 키로 다음 문장",
    legend: "(F1-F5) 단계  (F6) English  (Enter) 다음  (Esc) 종료",
};

static ENGLISH_TYPING: TypingLabels = TypingLabels {
    placeholder: "Start typing...",
    consonants: "Home Row",
    vowels: "Top/Bot",
    words: "Words",
    sentences: "Sentences",
    paragraphs: "Paragraphs",
    accuracy: "accuracy",
    cpm: "cpm",
    seconds: "time",
    next: "next",
    ready: "press Enter for the next prompt",
    legend: "(F1-F5) level  (F6) 한국어  (enter) next  (esc)ape",
};

static KOREAN_TIMER: TimerLabels = TimerLabels {
    title: "타이머 설정",
    hours: "시",
    minutes: "분",
    seconds: "초",
    start: "타이머 시작",
    pause: "일시정지",
    resume: "계속",
    cancel: "취소",
    collection: "나의 바다 🌊",
    collection_empty: "집중을 완료하고 바다 친구들을 모아보세요!",
    depth: "현재 수심",
    reward_title: "집중 완료! 🎉",
    reward_body: "심해 탐험을 마치고 새로운 친구를 만났습니다.",
    confirm: "확인",
    setting_legend: "←/→ 선택  ↑/↓ 조절  (Enter) 시작  (x) 바다 비우기  (Esc) 종료",
};

static ENGLISH_TIMER: TimerLabels = TimerLabels {
    title: "set timer",
    hours: "h",
    minutes: "m",
    seconds: "s",
    start: "start",
    pause: "pause",
    resume: "resume",
    cancel: "cancel",
    collection: "my sea 🌊",
    collection_empty: "finish a focus session to meet sea friends!",
    depth: "depth",
    reward_title: "focus complete! 🎉",
    reward_body: "back from the deep with a new friend.",
    confirm: "ok",
    setting_legend: "←/→ select  ↑/↓ adjust  (enter) start  (x) empty sea  (esc)ape",
};

pub fn typing_labels(language: Language) -> &'static TypingLabels {
    match language {
        Language::Korean => &KOREAN_TYPING,
        Language::English => &ENGLISH_TYPING,
    }
}

pub fn timer_labels(language: Language) -> &'static TimerLabels {
    match language {
        Language::Korean => &KOREAN_TIMER,
        Language::English => &ENGLISH_TIMER,
    }
}

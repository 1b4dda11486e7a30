// Linear stage machine for the greeting experience: three questions, a
// scratch reveal after each accepted question that has a photo, then the
// meter, then the celebration.

pub const QUESTION_STAGES: usize = 3;

// Accept-button growth driven by evasion attempts
pub const YES_GROWTH_STEP: f32 = 0.1;
pub const YES_SCALE_MAX: f32 = 2.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Question,
    Reveal,
    Meter,
    Celebration,
}

pub struct FlowEngine {
    pub phase: Phase,
    /// Zero-based question index, meaningful in Question/Reveal phases.
    pub stage: usize,
    pub yes_scale: f32,
    pub evade_count: u32,
    photos: usize,
}

impl FlowEngine {
    pub fn new(photos: usize) -> Self {
        Self {
            phase: Phase::Question,
            stage: 0,
            yes_scale: 1.0,
            evade_count: 0,
            photos,
        }
    }

    /// Side effect of a successful flee: the accept control grows, capped.
    /// Returns the new scale.
    pub fn note_evaded(&mut self) -> f32 {
        self.evade_count += 1;
        self.yes_scale = (self.yes_scale + YES_GROWTH_STEP).min(YES_SCALE_MAX);
        self.yes_scale
    }

    #[inline]
    pub fn is_last_question(&self) -> bool {
        self.stage + 1 >= QUESTION_STAGES
    }

    /// The accept control was pressed. Moves into the reveal interlude when
    /// a photo exists for this stage, otherwise straight onward.
    pub fn accept(&mut self) -> Phase {
        if self.phase != Phase::Question {
            return self.phase;
        }
        if self.stage < self.photos {
            self.phase = Phase::Reveal;
        } else {
            self.next_question();
        }
        self.phase
    }

    /// Continue out of the reveal interlude.
    pub fn advance(&mut self) -> Phase {
        if self.phase != Phase::Reveal {
            return self.phase;
        }
        self.next_question();
        self.phase
    }

    /// The meter reached its maximum and was released.
    pub fn meter_done(&mut self) -> Phase {
        if self.phase == Phase::Meter {
            self.phase = Phase::Celebration;
        }
        self.phase
    }

    fn next_question(&mut self) {
        if self.is_last_question() {
            self.phase = Phase::Meter;
        } else {
            self.stage += 1;
            self.phase = Phase::Question;
        }
        // fresh stage, fresh button
        self.yes_scale = 1.0;
        self.evade_count = 0;
    }
}

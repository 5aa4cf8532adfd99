use serde::Serialize;

/// The editing steps, in the order the wizard walks them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Step {
    PersonalInfo,
    Summary,
    Experience,
    Education,
    Projects,
    Skills,
}

impl Step {
    pub const ALL: [Step; 6] = [
        Step::PersonalInfo,
        Step::Summary,
        Step::Experience,
        Step::Education,
        Step::Projects,
        Step::Skills,
    ];

    pub fn title(self) -> &'static str {
        match self {
            Step::PersonalInfo => "Personal Information",
            Step::Summary => "Professional Summary",
            Step::Experience => "Professional Experience",
            Step::Education => "Education",
            Step::Projects => "Projects",
            Step::Skills => "Skills",
        }
    }
}

pub const LAST_STEP: usize = Step::ALL.len() - 1;

/// Linear step navigation. Touches nothing but its own index.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StepWizard {
    index: usize,
}

impl StepWizard {
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn current(&self) -> Step {
        Step::ALL[self.index]
    }

    pub fn advance(&mut self) {
        if self.index < LAST_STEP {
            self.index += 1;
        }
    }

    pub fn retreat(&mut self) {
        self.index = self.index.saturating_sub(1);
    }

    /// Moves to `index`, clamped into range.
    pub fn jump_to(&mut self, index: i64) {
        self.index = index.clamp(0, LAST_STEP as i64) as usize;
    }

    pub fn is_first(&self) -> bool {
        self.index == 0
    }

    pub fn is_last(&self) -> bool {
        self.index == LAST_STEP
    }
}

/// Wire view of the wizard for the step indicator.
#[derive(Debug, Clone, Serialize)]
pub struct WizardView {
    pub index: usize,
    pub step: Step,
    pub title: &'static str,
    pub is_first: bool,
    pub is_last: bool,
    pub steps: Vec<&'static str>,
}

impl From<&StepWizard> for WizardView {
    fn from(wizard: &StepWizard) -> Self {
        let step = wizard.current();
        WizardView {
            index: wizard.index(),
            step,
            title: step.title(),
            is_first: wizard.is_first(),
            is_last: wizard.is_last(),
            steps: Step::ALL.iter().map(|s| s.title()).collect(),
        }
    }
}

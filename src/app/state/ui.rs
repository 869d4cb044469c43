pub struct UiState {
    pub(in crate::app) history_visible: bool,
    pub(in crate::app) error: Option<String>,
}

impl UiState {
    pub(in crate::app) fn new() -> Self {
        UiState {
            history_visible: false,
            error: None,
        }
    }
}

//! User intents (Intent)

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    Quit,
    MoveSelectionUp,
    MoveSelectionDown,
    OpenSelected,

    StartSearch,
    ClearSearch,

    // Form / dialog interaction
    Cancel,      // Esc
    Submit,      // Enter
    Input(char), // typed character
    DeleteChar,  // Backspace
}

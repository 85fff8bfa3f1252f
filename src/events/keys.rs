// Keyboard shortcuts for the tour. Pure mapping, wired up in `keyboard.rs`.

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum KeyAction {
    ToggleHelp,
    ToggleFullscreen,
    ExitFullscreen,
    ReturnToStart,
    /// Select the n-th (0-based) navigation hotspot currently shown.
    Hotspot(usize),
}

#[inline]
pub fn hotspot_for_digit(key: &str) -> Option<usize> {
    match key {
        "1" | "2" | "3" | "4" | "5" | "6" | "7" | "8" | "9" => {
            key.parse::<usize>().ok().map(|n| n - 1)
        }
        _ => None,
    }
}

#[inline]
pub fn action_for_key(key: &str) -> Option<KeyAction> {
    if let Some(n) = hotspot_for_digit(key) {
        return Some(KeyAction::Hotspot(n));
    }
    match key {
        "h" | "H" | "?" => Some(KeyAction::ToggleHelp),
        "Enter" | "f" | "F" => Some(KeyAction::ToggleFullscreen),
        "Escape" => Some(KeyAction::ExitFullscreen),
        "Home" | "0" => Some(KeyAction::ReturnToStart),
        _ => None,
    }
}

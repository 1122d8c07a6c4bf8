use std::str::FromStr;

pub const MENU: &str = "Add [P]assenger, Add [G]roup, [C]ancel Reservations, Print Seating [A]vailability Chart, Print [M]anifest, [Q]uit";

/// Top-level session command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    AddPassenger,
    AddGroup,
    Cancel,
    Availability,
    Manifest,
    Quit,
}

impl FromStr for MenuChoice {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "P" => Ok(MenuChoice::AddPassenger),
            "G" => Ok(MenuChoice::AddGroup),
            "C" => Ok(MenuChoice::Cancel),
            "A" => Ok(MenuChoice::Availability),
            "M" => Ok(MenuChoice::Manifest),
            "Q" => Ok(MenuChoice::Quit),
            other => Err(other.to_string()),
        }
    }
}

use crate::models::macros::string_enum;

string_enum! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub enum ShiftType {
        Day => "day",
        Night => "night",
        Weekend => "weekend",
    }
}

impl ShiftType {
    pub fn label(&self) -> &'static str {
        match self {
            ShiftType::Day => "Day",
            ShiftType::Night => "Night",
            ShiftType::Weekend => "Weekend",
        }
    }
}

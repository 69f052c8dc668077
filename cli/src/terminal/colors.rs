use colored::Color;

pub const PRIMARY: Color = Color::TrueColor { r: 130, g: 170, b: 255 };
pub const ACCENT: Color = Color::TrueColor { r: 255, g: 203, b: 107 };
pub const SEPARATOR: Color = Color::BrightBlack;
pub const TEXT_DEFAULT: Color = Color::TrueColor { r: 205, g: 214, b: 244 };

pub const IPV4_ADDR: Color = Color::TrueColor { r: 137, g: 221, b: 255 };
pub const IPV6_ADDR: Color = Color::TrueColor { r: 199, g: 146, b: 234 };
pub const HOSTNAME: Color = Color::TrueColor { r: 195, g: 232, b: 141 };
pub const LATENCY: Color = Color::Yellow;

pub const STATUS_ACTIVE: Color = Color::Green;
pub const STATUS_TIMEOUT: Color = Color::Red;
pub const STATUS_UNREACHABLE: Color = Color::Yellow;
pub const STATUS_INACTIVE: Color = Color::Magenta;
pub const STATUS_OTHER: Color = Color::White;

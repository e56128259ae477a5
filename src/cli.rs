// cli.rs - Command-line interface configuration
use clap::Parser;

use crate::theme::Theme;

#[derive(Parser, Debug, Clone)]
#[command(name = "ambient-scene")]
#[command(about = "Decorative 3D particle backdrop", long_about = None)]
pub struct Cli {
    /// Starting theme for the backdrop palette
    #[arg(long, value_enum, default_value = "dark")]
    pub theme: Theme,

    /// Initial window width in logical pixels
    #[arg(long, default_value_t = 800)]
    pub width: u32,

    /// Initial window height in logical pixels
    #[arg(long, default_value_t = 600)]
    pub height: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_dark_800x600() {
        let cli = Cli::parse_from(["ambient-scene"]);
        assert_eq!(cli.theme, Theme::Dark);
        assert_eq!(cli.width, 800);
        assert_eq!(cli.height, 600);
    }

    #[test]
    fn theme_flag_parses() {
        let cli = Cli::parse_from(["ambient-scene", "--theme", "light"]);
        assert_eq!(cli.theme, Theme::Light);
    }
}

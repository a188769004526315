//! Application related stuff

use clap::Parser;

lazy_static! {
    /// The global application options.
    pub static ref OPTIONS: Options = Options::parse();
}

/// Returns the global application options.
pub fn options() -> &'static Options {
    &OPTIONS
}

/// System wide options.
#[derive(Parser, Clone, Debug, Default)]
#[command(author, version, about, long_about = None)]
pub struct Options {
    /// Suppress all text output other than error messages.
    #[arg(long, help = "Suppress all text output other than error messages.")]
    pub quiet: bool,

    /// Only print the row of the named profile.
    #[arg(
        long = "profile",
        short = 'p',
        value_name = "NAME",
        help = "Only print the table row of the named profile."
    )]
    pub profile: Option<String>,

    /// Print the unencoded kernels and transmission profiles instead of the
    /// packed table rows.
    #[arg(
        long,
        help = "Print the unencoded kernels and transmission profiles instead of the packed rows."
    )]
    pub raw: bool,

    /// Input file paths.
    #[arg(help = "Profile description files")]
    pub paths: Vec<String>,
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_arguments() {
        let o = Options::parse_from(["sss-profile-bake", "--raw", "-p", "Skin", "a.ssp", "b.ssp"]);
        assert!(o.raw);
        assert!(!o.quiet);
        assert_eq!(o.profile.as_deref(), Some("Skin"));
        assert_eq!(o.paths, vec![String::from("a.ssp"), String::from("b.ssp")]);
    }

    #[test]
    fn raw_help_describes_output() {
        use clap::CommandFactory;

        let help = Options::command().render_help().to_string();
        assert!(help.contains("unencoded kernels"));
        assert!(!help.contains("RGBA"));
    }
}

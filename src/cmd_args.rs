use std::ffi::OsString;

pub use clap::Parser;

#[derive(Parser, Debug)]
#[command(version, about = "Command-line client for the myFlix movie API", long_about = None)]
struct ClapArgs {
    /// Profile name
    /// Selects the API URL and session file from the profile file. Default is 'default'.
    /// An unknown profile falls back to the built-in defaults.
    #[clap(short = 'p', long, default_value = "default", help = "profile name")]
    profile: String,

    #[clap(short = 'v', long, help = "log debug output to stderr")]
    verbose: bool,

    #[clap(long, help = "override the profile's API URL")]
    api_url: Option<String>,

    #[clap(long, help = "keep the session in memory only")]
    ephemeral: bool,
}

#[derive(Debug, Clone)]
pub struct CommandLineArgs {
    profile: String,
    verbose: bool,
    api_url: Option<String>,
    ephemeral: bool,
}

impl From<ClapArgs> for CommandLineArgs {
    fn from(args: ClapArgs) -> Self {
        Self {
            profile: args.profile,
            verbose: args.verbose,
            api_url: args.api_url,
            ephemeral: args.ephemeral,
        }
    }
}

impl CommandLineArgs {
    pub fn parse() -> Self {
        ClapArgs::parse().into()
    }

    pub fn parse_from<I, T>(itr: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        ClapArgs::parse_from(itr).into()
    }

    pub fn profile(&self) -> &String {
        &self.profile
    }

    pub fn verbose(&self) -> bool {
        self.verbose
    }

    pub fn api_url(&self) -> Option<&str> {
        self.api_url.as_deref()
    }

    pub fn ephemeral(&self) -> bool {
        self.ephemeral
    }
}

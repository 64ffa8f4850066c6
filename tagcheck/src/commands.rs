use crate::CLAP_STYLING;
use clap::arg;
use url::Url;

pub const CHECKSFILE_DEFAULT: &str = "checks.json";
pub const HTMLFILE_DEFAULT: &str = "index.html";

pub fn command_argument_builder() -> clap::Command {
    clap::Command::new("tagcheck")
        .version(env!("CARGO_PKG_VERSION"))
        .bin_name("tagcheck")
        .about(
            "Checks an HTML file or URL for the elements named by a list of CSS selectors \
            and prints a JSON presence map",
        )
        .styles(CLAP_STYLING)
        .arg(
            arg!(-c --"checks" <CHECK_FILE>)
                .required(false)
                .help("Path to a JSON array of CSS selectors to check for")
                .default_value(CHECKSFILE_DEFAULT),
        )
        .arg(
            arg!(-f --"file" <HTML_FILE>)
                .required(false)
                .help("Path to the HTML file to be checked")
                .default_value(HTMLFILE_DEFAULT),
        )
        .arg(
            arg!(-u --"url" <URL>)
                .required(false)
                .help("URL of the HTML page to be checked (overrides --file)")
                .value_parser(clap::value_parser!(Url)),
        )
        .arg(
            arg!(--"retries" <NUM>)
                .required(false)
                .help("How many times a failed URL fetch is retried")
                .value_parser(clap::value_parser!(u32))
                .default_value("1"),
        )
        .arg(
            arg!(--"retry-delay" <SECONDS>)
                .required(false)
                .help("Delay before the first retry; doubles on every further retry")
                .value_parser(clap::value_parser!(u64))
                .default_value("5"),
        )
        .arg(
            arg!(--"timeout" <SECONDS>)
                .required(false)
                .help("Request timeout in seconds")
                .value_parser(clap::value_parser!(u64).range(1..))
                .default_value("30"),
        )
        .arg(
            arg!(-q --"quiet" "Suppress progress output on stderr")
                .required(false)
                .conflicts_with("verbose"),
        )
        .arg(arg!(-v --"verbose" "Enable debug logging on stderr").required(false))
}

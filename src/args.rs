use clap::Parser;

/// This is a survey program for binary-choice and ranking questions.
#[derive(Parser, Debug, Clone)]
#[clap(author, version, about, long_about = None)]
pub struct Args {
    /// (file path, optional) The file containing the survey questions in JSON format.
    /// If not provided, the built-in questions selected by --kind are used.
    #[clap(short, long, value_parser)]
    pub config: Option<String>,

    /// (binary or ranking, default binary) The kind of built-in questions to ask when no
    /// survey file is given.
    #[clap(short, long, value_parser)]
    pub kind: Option<String>,

    /// (file path, optional) A JSON file with the actions to replay instead of asking the
    /// questions on the terminal.
    #[clap(short, long, value_parser)]
    pub script: Option<String>,

    /// (file path) A reference file containing the report of a survey in JSON format. If
    /// provided, pollrun will check that the computed report matches the reference.
    #[clap(short, long, value_parser)]
    pub reference: Option<String>,

    /// (file path, 'stdout' or empty) If specified, the report of the survey will be written
    /// in JSON format to the given location.
    #[clap(short, long, value_parser)]
    pub out: Option<String>,

    /// If passed as an argument, the demographic questions are asked before the survey.
    #[clap(long, takes_value = false)]
    pub demographics: bool,

    // Other arguments
    /// If passed as an argument, will turn on verbose logging to the standard output.
    #[clap(long, takes_value = false)]
    pub verbose: bool,
}

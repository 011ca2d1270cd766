use crate::Arguments;
use clap::{
    arg, crate_authors, crate_description, crate_name, crate_version, value_parser, Arg,
    ArgAction, ArgMatches, Command,
};
use std::ffi::OsString;
use std::path::PathBuf;

pub struct CLIParser {
    command: Command,
}

impl CLIParser {
    pub fn new() -> Self {
        let command = Self::create_base_command();
        let command = Self::register_arguments(command);
        CLIParser { command }
    }

    pub fn parse<I, T>(&mut self, itr: I) -> Arguments
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        let matches = self
            .command
            .try_get_matches_from_mut(itr)
            .unwrap_or_else(|e| e.exit());
        Self::extract_arguments(&matches)
    }

    fn register_arguments(command: Command) -> Command {
        let command = Self::register_script_argument(command);
        Self::register_echo_argument(command)
    }

    fn register_script_argument(command: Command) -> Command {
        command.arg(Self::create_script_argument())
    }

    fn register_echo_argument(command: Command) -> Command {
        command.arg(Self::create_echo_argument())
    }

    fn create_base_command() -> Command {
        Command::new(crate_name!())
            .version(crate_version!())
            .author(crate_authors!())
            .about(crate_description!())
    }

    fn create_script_argument() -> Arg {
        Arg::new("script")
            .help("File with one command per line, standard input when omitted")
            .value_parser(value_parser!(PathBuf))
            .required(false)
    }

    fn create_echo_argument() -> Arg {
        arg!(-e --echo "Repeat every command before its response").action(ArgAction::SetTrue)
    }

    fn extract_arguments(matches: &ArgMatches) -> Arguments {
        Arguments {
            script: Self::extract_script_argument(matches),
            echo: Self::extract_echo_argument(matches),
        }
    }

    fn extract_script_argument(matches: &ArgMatches) -> Option<PathBuf> {
        matches.get_one::<PathBuf>("script").cloned()
    }

    fn extract_echo_argument(matches: &ArgMatches) -> bool {
        matches.get_flag("echo")
    }
}

impl Default for CLIParser {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use clap::Command;

    use super::CLIParser;

    const PROGRAM_NAME_ARGUMENT: &str = "test_program_name";

    #[test]
    fn parse_script_argument() {
        let script_file_name = "commands.txt";
        let command = Command::new("test");
        let command = CLIParser::register_script_argument(command);
        let matches = command.get_matches_from(vec![PROGRAM_NAME_ARGUMENT, script_file_name]);
        let script = CLIParser::extract_script_argument(&matches).unwrap();
        assert_eq!(script.file_name().unwrap(), script_file_name);
    }

    #[test]
    fn script_argument_is_optional() {
        let command = Command::new("test");
        let command = CLIParser::register_script_argument(command);
        let matches = command.get_matches_from(vec![PROGRAM_NAME_ARGUMENT]);
        assert!(CLIParser::extract_script_argument(&matches).is_none());
    }

    #[test]
    fn parse_echo_argument() {
        let command = Command::new("test");
        let command = CLIParser::register_echo_argument(command);
        let matches = command.get_matches_from(vec![PROGRAM_NAME_ARGUMENT, "--echo"]);
        assert!(CLIParser::extract_echo_argument(&matches));
    }

    #[test]
    fn echo_does_not_take_a_value() {
        let command = Command::new("test");
        let command = CLIParser::register_echo_argument(command);
        let result = command.try_get_matches_from(vec![PROGRAM_NAME_ARGUMENT, "--echo=yes"]);
        assert!(result.is_err(), "Value for echo flag not detected");
    }

    #[test]
    fn parse_all_arguments() {
        let script_file_name = "session.txt";
        let script_file_path = format!("/scripts/{}", script_file_name);
        let mut cli_parser = CLIParser::default();
        let arguments = cli_parser.parse(vec![PROGRAM_NAME_ARGUMENT, "-e", &script_file_path]);
        assert_eq!(
            arguments.script.unwrap().file_name().unwrap(),
            script_file_name,
            "script file does not match"
        );
        assert!(arguments.echo, "echo does not match");
    }

    #[test]
    fn defaults_without_arguments() {
        let mut cli_parser = CLIParser::default();
        let arguments = cli_parser.parse(vec![PROGRAM_NAME_ARGUMENT]);
        assert!(arguments.script.is_none());
        assert!(!arguments.echo);
    }
}

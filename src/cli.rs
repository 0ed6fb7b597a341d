use anyhow::{bail, Context as _, Result};
use console::style;
use std::io::ErrorKind;
use std::ops::ControlFlow;
use std::str::FromStr;

use crate::args::Args;
use crate::config::Config;
use crate::manager::{ImportOutcome, SalesManager, NAMING_CONVENTION};
use crate::terminal::{DialoguerPrompter, LineWriter, Prompter, StdoutLineWriter};

const COMMAND_WIDTH: usize = 6;

pub fn main(args: Args) -> Result<()> {
    let mut config = Config::load_or_default(args.config.as_deref())?;
    if let Some(data_dir) = args.data_dir {
        config.data_dir = data_dir;
    }
    config.validate()?;

    let mut cli = Cli::start(&config, DialoguerPrompter::new(), StdoutLineWriter)?;
    cli.run()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    View,
    Add1,
    Add2,
    Import,
    Menu,
    Exit,
}

impl Command {
    pub const ALL: [Command; 6] = [
        Command::View,
        Command::Add1,
        Command::Add2,
        Command::Import,
        Command::Menu,
        Command::Exit,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Command::View => "view",
            Command::Add1 => "add1",
            Command::Add2 => "add2",
            Command::Import => "import",
            Command::Menu => "menu",
            Command::Exit => "exit",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Command::View => "View all sales",
            Command::Add1 => "Add sales by typing sales, year, month, day, and region",
            Command::Add2 => "Add sales by typing sales, date (YYYY-MM-DD), and region",
            Command::Import => "Import sales from file",
            Command::Menu => "Show menu",
            Command::Exit => "Exit program",
        }
    }
}

impl FromStr for Command {
    type Err = anyhow::Error;

    fn from_str(input: &str) -> Result<Self> {
        let input = input.trim().to_lowercase();
        match Command::ALL
            .into_iter()
            .find(|command| command.name() == input)
        {
            Some(command) => Ok(command),
            None => bail!("Unknown command '{input}'"),
        }
    }
}

pub struct Cli<P: Prompter, W: LineWriter> {
    manager: SalesManager,
    prompter: P,
    writer: W,
}

impl<P: Prompter, W: LineWriter> Cli<P, W> {
    /// Show the title and menu, then load the master file
    pub fn start(config: &Config, mut prompter: P, writer: W) -> Result<Self> {
        writer.write_line("");
        writer.write_line(&style("SALES DATA IMPORTER").bold().to_string());
        writer.write_line("");
        print_menu(&writer);

        if !config.master_file_path().try_exists()? {
            prompter.info("Sales file not found. Starting with an empty list.");
        }
        let manager = SalesManager::load(config).context("Failed to load sales")?;
        Ok(Self {
            manager,
            prompter,
            writer,
        })
    }

    pub fn manager(&self) -> &SalesManager {
        &self.manager
    }

    /// Run commands until `exit`. Sales are saved when leaving, also if reading input failed.
    pub fn run(&mut self) -> Result<()> {
        loop {
            let input = match self.prompter.prompt("Enter command") {
                Ok(input) => input,
                Err(err) => return self.save_after_input_failure(err),
            };
            let command = match input.parse::<Command>() {
                Ok(command) => command,
                Err(err) => {
                    log::debug!("{err}");
                    self.prompter.warn("Invalid command. Please try again.");
                    print_menu(&self.writer);
                    continue;
                }
            };
            match self.execute(command) {
                Ok(ControlFlow::Continue(())) => {}
                Ok(ControlFlow::Break(exit_result)) => return exit_result,
                Err(err) => return self.save_after_input_failure(err),
            }
        }
    }

    /// Errors returned here come from reading input. `exit` breaks with the result of saving.
    fn execute(&mut self, command: Command) -> Result<ControlFlow<Result<()>>> {
        match command {
            Command::View => {
                if !self.manager.view(&self.writer) {
                    self.prompter.info("No sales to view.");
                }
            }
            Command::Add1 => {
                self.manager.add_by_components(&mut self.prompter)?;
            }
            Command::Add2 => {
                self.manager.add_by_date(&mut self.prompter)?;
            }
            Command::Import => self.import()?,
            Command::Menu => print_menu(&self.writer),
            Command::Exit => return Ok(ControlFlow::Break(self.exit())),
        }
        Ok(ControlFlow::Continue(()))
    }

    fn exit(&mut self) -> Result<()> {
        self.save()?;
        self.prompter.info("Bye!");
        Ok(())
    }

    fn save_after_input_failure(&mut self, err: anyhow::Error) -> Result<()> {
        log::error!("Reading input failed, saving before exiting");
        self.save()?;
        Err(err.context("Failed to read input"))
    }

    fn import(&mut self) -> Result<()> {
        let input = self.prompter.prompt("Enter name of file to import")?;
        let file_name = input.trim();
        match self.manager.import_from_file(file_name) {
            Ok(ImportOutcome::BadFileName) => self.prompter.warn(&format!(
                "Filename '{file_name}' doesn't follow the expected format of '{NAMING_CONVENTION}'."
            )),
            Ok(ImportOutcome::AlreadyImported) => self
                .prompter
                .warn(&format!("File '{file_name}' has already been imported.")),
            Ok(ImportOutcome::NoValidData) => self.prompter.warn("No valid data imported."),
            Ok(ImportOutcome::Imported { .. }) => self
                .prompter
                .info(&format!("Sales from file '{file_name}' have been added.")),
            Err(err) if is_not_found(&err) => {
                log::debug!("{err:#}");
                self.prompter
                    .warn(&format!("File '{file_name}' not found."))
            }
            Err(err) => self.prompter.warn(&format!(
                "An error occurred while importing '{file_name}': {err:#}"
            )),
        }
        Ok(())
    }

    fn save(&mut self) -> Result<()> {
        match self.manager.save() {
            Ok(()) => {
                self.prompter.info("Saved sales records.");
                Ok(())
            }
            Err(err) => {
                self.prompter
                    .warn(&format!("Failed to save sales records: {err:#}"));
                Err(err)
            }
        }
    }
}

fn is_not_found(err: &anyhow::Error) -> bool {
    err.chain().any(|cause| {
        cause
            .downcast_ref::<std::io::Error>()
            .is_some_and(|io_err| io_err.kind() == ErrorKind::NotFound)
    })
}

fn print_menu(writer: &impl LineWriter) {
    writer.write_line("COMMAND MENU");
    for command in Command::ALL {
        writer.write_line(&format!(
            "{:<COMMAND_WIDTH$} - {}",
            command.name(),
            command.description()
        ));
    }
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use super::*;
    use crate::terminal::{ScriptedPrompter, VecLineWriter};

    fn config(data_dir: &Path) -> Config {
        Config {
            data_dir: data_dir.canonicalize().unwrap(),
            ..Config::default()
        }
    }

    #[test]
    fn parse_commands() {
        assert_eq!(Command::View, "view".parse::<Command>().unwrap());
        assert_eq!(Command::Add1, " ADD1 ".parse::<Command>().unwrap());
        assert_eq!(Command::Add2, "add2".parse::<Command>().unwrap());
        assert_eq!(Command::Import, "Import".parse::<Command>().unwrap());
        assert_eq!(Command::Menu, "menu".parse::<Command>().unwrap());
        assert_eq!(Command::Exit, "exit\n".parse::<Command>().unwrap());
        assert!("quit".parse::<Command>().is_err());
        assert!("".parse::<Command>().is_err());
    }

    #[test]
    fn menu() {
        let writer = VecLineWriter::new();
        print_menu(&writer);
        assert_eq!(
            vec![
                "COMMAND MENU",
                "view   - View all sales",
                "add1   - Add sales by typing sales, year, month, day, and region",
                "add2   - Add sales by typing sales, date (YYYY-MM-DD), and region",
                "import - Import sales from file",
                "menu   - Show menu",
                "exit   - Exit program",
            ],
            writer.lines()
        );
    }

    #[test]
    fn session_adds_imports_and_saves_on_exit() {
        let tempdir = tempfile::tempdir().unwrap();
        let config = config(tempdir.path());
        std::fs::write(
            config.data_dir.join("sales_q1_2024_c.csv"),
            "30,2024-02-02,c\n",
        )
        .unwrap();
        let prompter = ScriptedPrompter::new(&[
            "view",
            "add1",
            "10",
            "2024",
            "1",
            "15",
            "w",
            "add2",
            "20.5",
            "2024-05-06",
            "e",
            "import",
            "sales_q1_2024_c.csv",
            "import",
            "sales_q1_2024_c.csv",
            "bogus",
            "view",
            "exit",
        ]);

        let mut cli = Cli::start(&config, prompter, VecLineWriter::new()).unwrap();
        cli.run().unwrap();

        assert_eq!(3, cli.manager().sales().len());
        assert_eq!(
            "10,2024-01-15,w\n20.5,2024-05-06,e\n30,2024-02-02,c\n",
            std::fs::read_to_string(config.master_file_path()).unwrap()
        );
        assert_eq!(
            vec![
                "Sales file not found. Starting with an empty list.",
                "No sales to view.",
                "Sales for 2024-01-15 is added.",
                "Sales for 2024-05-06 is added.",
                "Sales from file 'sales_q1_2024_c.csv' have been added.",
                "Saved sales records.",
                "Bye!",
            ],
            cli.prompter.infos
        );
        assert_eq!(
            vec![
                "File 'sales_q1_2024_c.csv' has already been imported.",
                "Invalid command. Please try again.",
            ],
            cli.prompter.warnings
        );
        assert!(cli
            .writer
            .lines()
            .iter()
            .any(|line| line.starts_with("Total") && line.ends_with("$60.50")));
    }

    #[test]
    fn import_messages() {
        let tempdir = tempfile::tempdir().unwrap();
        let config = config(tempdir.path());
        std::fs::write(config.data_dir.join("empty.csv"), "1,2\n").unwrap();
        let prompter = ScriptedPrompter::new(&[
            "import",
            "sales_q1_2024_w.txt",
            "import",
            "empty.csv",
            "import",
            "missing.csv",
            "exit",
        ]);

        let mut cli = Cli::start(&config, prompter, VecLineWriter::new()).unwrap();
        cli.run().unwrap();

        let warnings = &cli.prompter.warnings;
        assert_eq!(3, warnings.len());
        assert_eq!(
            "Filename 'sales_q1_2024_w.txt' doesn't follow the expected format of 'sales_qn_yyyy_r.csv'.",
            warnings[0]
        );
        assert_eq!("No valid data imported.", warnings[1]);
        assert_eq!("File 'missing.csv' not found.", warnings[2]);
        assert!(cli.manager().sales().is_empty());
        assert!(!config.import_log_path().exists());
    }

    #[test]
    fn unreadable_import_file_is_reported() {
        let tempdir = tempfile::tempdir().unwrap();
        let config = config(tempdir.path());
        std::fs::create_dir(config.data_dir.join("sales_q1_2024_w.csv")).unwrap();
        let prompter = ScriptedPrompter::new(&["import", "sales_q1_2024_w.csv", "exit"]);

        let mut cli = Cli::start(&config, prompter, VecLineWriter::new()).unwrap();
        cli.run().unwrap();

        assert_eq!(1, cli.prompter.warnings.len());
        assert!(cli.prompter.warnings[0]
            .starts_with("An error occurred while importing 'sales_q1_2024_w.csv'"));
        assert_eq!(vec!["Saved sales records.", "Bye!"], cli.prompter.infos);
    }

    #[test]
    fn exit_saves_once() {
        let tempdir = tempfile::tempdir().unwrap();
        let config = config(tempdir.path());
        let prompter = ScriptedPrompter::new(&["menu", "exit", "view"]);

        let mut cli = Cli::start(&config, prompter, VecLineWriter::new()).unwrap();
        cli.run().unwrap();

        assert_eq!(1, cli.prompter.remaining_inputs());
        assert_eq!(
            vec![
                "Sales file not found. Starting with an empty list.",
                "Saved sales records.",
                "Bye!"
            ],
            cli.prompter.infos
        );
    }

    #[test]
    fn loads_existing_master_file() {
        let tempdir = tempfile::tempdir().unwrap();
        let config = config(tempdir.path());
        std::fs::write(config.master_file_path(), "5,2024-01-01,m\n").unwrap();
        let prompter = ScriptedPrompter::new(&["exit"]);

        let mut cli = Cli::start(&config, prompter, VecLineWriter::new()).unwrap();
        assert_eq!(1, cli.manager().sales().len());
        cli.run().unwrap();
        assert_eq!(vec!["Saved sales records.", "Bye!"], cli.prompter.infos);
    }

    #[test]
    fn saves_when_input_runs_out() {
        let tempdir = tempfile::tempdir().unwrap();
        let config = config(tempdir.path());
        let prompter = ScriptedPrompter::new(&["add2", "7", "2024-12-01", "c"]);

        let mut cli = Cli::start(&config, prompter, VecLineWriter::new()).unwrap();
        assert!(cli.run().is_err());
        assert_eq!(
            "7,2024-12-01,c\n",
            std::fs::read_to_string(config.master_file_path()).unwrap()
        );
    }

    #[test]
    fn save_failure_is_reported() {
        let tempdir = tempfile::tempdir().unwrap();
        let config = Config {
            master_file: Path::new("missing").join("all_sales.csv"),
            ..config(tempdir.path())
        };
        let prompter = ScriptedPrompter::new(&["exit"]);

        let mut cli = Cli::start(&config, prompter, VecLineWriter::new()).unwrap();
        assert!(cli.run().is_err());
        assert_eq!(1, cli.prompter.warnings.len());
        assert!(cli.prompter.warnings[0].starts_with("Failed to save sales records"));
    }
}

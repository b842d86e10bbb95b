use rustyline::error::ReadlineError;
use rustyline::Editor;

use chive::Interpreter;

const REPL_PROMPT: &str = ">> ";
const REPL_WELCOME_MSG: &str = concat!("Welcome to chive v", env!("CARGO_PKG_VERSION"), ".");
const REPL_EXIT_MSG: &str = "\nLeaving chive.\n";

pub fn repl(interp: &Interpreter) -> Result<String, ReadlineError> {
    println!("\n{}\nEnter `.help` to list special commands.\n", REPL_WELCOME_MSG);

    let mut rl = Editor::<()>::new()?;

    loop {
        match rl.readline(REPL_PROMPT) {
            Ok(line) => {
                rl.add_history_entry(line.as_str());
                match line.trim() {
                    "" => continue,
                    ".exit" => break Ok(REPL_EXIT_MSG.to_string()),
                    ".clear" => {
                        rl.clear_history();
                    }
                    ".help" => {
                        print!("\n{}\n", include_str!("help.txt"));
                    }
                    other => match interp.run(other) {
                        Ok(value) => {
                            let res = format!("{}", value);
                            if !res.is_empty() {
                                println!("{}", res);
                            }
                        }
                        Err(error) => println!("{}", error),
                    },
                }
            }
            Err(ReadlineError::Eof) | Err(ReadlineError::Interrupted) => {
                break Ok(REPL_EXIT_MSG.to_string());
            }
            Err(error) => break Err(error),
        }
    }
}

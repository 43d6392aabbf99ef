mod demo;

use std::fs::File;
use std::time::Duration;

use signin_lib::validation::FieldStatus;
use signin_lib::{LoginForm, LoginFormConfig, SubmitOutcome};
use simplelog::{Config, LevelFilter, WriteLogger};
use tokio::io::{AsyncBufReadExt, BufReader};

use crate::demo::{ConsoleNavigator, ConsoleNotifier, DemoAuthenticator};

const HELP: &str = "\
commands:
  type <field> <value>    change a field (no validation shown until blur)
  blur <field> [value]    leave a field, optionally with a new value
  submit                  submit the form
  register                go to account creation
  toggle                  show/hide password
  show                    print the form state
  reset                   reset the form
  quit";

fn init_logging() {
    let level = std::env::var("SIGNIN_LOG")
        .ok()
        .and_then(|l| l.parse::<LevelFilter>().ok())
        .unwrap_or(LevelFilter::Debug);
    match File::create("signin-cli.log") {
        Ok(file) => {
            if let Err(e) = WriteLogger::init(level, Config::default(), file) {
                eprintln!("Failed to initialize logger: {}", e);
            }
        }
        Err(e) => eprintln!("Failed to create log file: {}", e),
    }
}

fn load_config() -> LoginFormConfig {
    let Some(path) = std::env::args().nth(1) else {
        return LoginFormConfig::default();
    };
    match LoginFormConfig::load(&path) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Ignoring config {}: {}", path, e);
            log::error!("Failed to load config {}: {}", path, e);
            LoginFormConfig::default()
        }
    }
}

fn print_state(form: &LoginForm) {
    for field in form.schema().fields() {
        let name = field.name();
        let value = if name == form.config().secret_field && !form.password_visible() {
            "*".repeat(form.value(name).chars().count())
        } else {
            form.value(name).to_string()
        };
        let marker = match form.field_status(name) {
            FieldStatus::None => " ",
            FieldStatus::Error => "x",
            FieldStatus::Success => "v",
        };
        println!("  [{}] {:<10} {:?}", marker, name, value);
        if let Some(error) = form.field_error(name) {
            println!("      {}", error);
        }
    }
    if let Some(error) = form.general_error() {
        println!("  ! {}", error);
    }
    let submit = if form.can_submit() {
        "enabled"
    } else {
        "disabled"
    };
    println!(
        "  valid={} attempts={} submit={}",
        form.is_valid(),
        form.submit_attempts(),
        submit
    );
}

async fn handle(form: &mut LoginForm, line: &str) -> bool {
    let mut parts = line.splitn(3, ' ');
    let command = parts.next().unwrap_or_default();
    let field = parts.next();
    let rest = parts.next();

    let result = match (command, field) {
        ("type", Some(field)) => form.on_change(field, rest.unwrap_or_default()),
        ("blur", Some(field)) => {
            let value = rest
                .map(str::to_string)
                .unwrap_or_else(|| form.value(field).to_string());
            form.on_blur(field, &value)
        }
        ("submit", _) => {
            match form.on_submit().await {
                SubmitOutcome::LoggedIn => println!("  logged in"),
                SubmitOutcome::Invalid(_) => {}
                SubmitOutcome::Failed(e) => log::debug!("Submit failed: {}", e),
            }
            Ok(())
        }
        ("register", _) => {
            form.go_to_register();
            Ok(())
        }
        ("toggle", _) => {
            form.toggle_password_visibility();
            Ok(())
        }
        ("reset", _) => {
            form.reset();
            Ok(())
        }
        ("show", _) => Ok(()),
        ("quit" | "exit", _) => return false,
        _ => {
            println!("{}", HELP);
            return true;
        }
    };

    match result {
        Ok(()) => print_state(form),
        Err(e) => println!("  {}", e),
    }
    true
}

#[tokio::main]
async fn main() {
    init_logging();

    let config = load_config();
    let form = LoginForm::builder()
        .authenticator(DemoAuthenticator::new(Duration::from_millis(400)))
        .notifier(ConsoleNotifier)
        .navigator(ConsoleNavigator)
        .config(config)
        .build();

    let mut form = match form {
        Ok(form) => form,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    println!("{}", HELP);
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        let line = match lines.next_line().await {
            Ok(Some(line)) => line,
            Ok(None) => break,
            Err(e) => {
                eprintln!("Error: {}", e);
                break;
            }
        };
        let line = line.trim_end_matches(['\r', '\n']);
        if line.trim().is_empty() {
            continue;
        }
        if !handle(&mut form, line).await {
            break;
        }
    }
}

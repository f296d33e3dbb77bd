use dicemath::evaluate;
use indoc::indoc;
use log::error;
use std::env;
use tracing_subscriber::filter::EnvFilter;

const USAGE: &str = indoc! {"
    Usage: dicemath-cmd <equation>

    Evaluates an arithmetic equation and prints the result. Supports
    + - * and the dice operator NdM (roll N dice of M sides and sum),
    parentheses, and unary minus.

    Examples:
      dicemath-cmd 2d6 + 3
      dicemath-cmd '(10 + 5)*4'
      dicemath-cmd '7(1d4-1)'
"};

fn main() {
    let filter = if env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else {
        EnvFilter::new("dicemath=info")
    };

    tracing_subscriber::fmt().with_env_filter(filter).init();

    let input = env::args().skip(1).collect::<Vec<String>>().join(" ");
    if input.trim().is_empty() {
        println!("{}", USAGE);
        return;
    }

    match evaluate(input.as_bytes()) {
        Ok(value) => println!("{} = {}", input, value),
        Err(e) => {
            error!("{}", e);
            std::process::exit(1);
        }
    }
}

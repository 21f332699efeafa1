use bugdesk::app::command_handlers;

fn output_header() -> &'static str {
    "bugdesk\nGuided bug-report intake for QA teams."
}

fn run() -> Result<(), String> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    if args.first().map(String::as_str) != Some("report") {
        println!("{}\n", output_header());
    }
    let output = command_handlers::run_cli(args)?;
    println!("{output}");
    Ok(())
}

fn main() {
    if let Err(err) = run() {
        eprintln!("{err}");
        std::process::exit(1);
    }
}

use std::io;

fn main() {
    let matches = tarjeta_cli::command().get_matches();
    tarjeta_cli::init_logging(matches.get_flag("verbose"), matches.get_flag("log-json"));

    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut out = io::stdout();

    let code = match tarjeta_cli::run(&matches, &mut input, &mut out) {
        Ok(code) => code,
        Err(e) => {
            tracing::error!("{e:#}");
            eprintln!("error: {e:#}");
            1
        }
    };
    std::process::exit(code);
}

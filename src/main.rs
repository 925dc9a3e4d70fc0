use blockgrid::core::cli::{CliPaths, USAGE};
use blockgrid::core::context::AppContext;
use blockgrid::logging::LogTarget;
use blockgrid::prompter::flows::main_flow::MainFlow;
use blockgrid::prompter::prompter::Prompter;

fn main() {
    let paths = match CliPaths::from_env() {
        Ok(paths) => paths,
        Err(err) => {
            eprintln!("{err}");
            eprintln!("{USAGE}");
            std::process::exit(2);
        }
    };
    let mut ctx = match AppContext::new_with_paths(&paths) {
        Ok(ctx) => ctx,
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(1);
        }
    };
    ctx.logger.info(
        format!("Session started with config {}", paths.config_path.display()),
        LogTarget::FileOnly,
    );

    let prompter = Prompter::new();
    let flow = MainFlow::new(&mut ctx);
    if let Err(err) = prompter.run(flow) {
        ctx.logger.error(format!("{err}"), LogTarget::ConsoleAndFile);
    }
}

// SPDX-License-Identifier: MPL-2.0
use iced_cull::app::{self, paths, Flags};

const HELP: &str = "\
Usage: iced_cull [OPTIONS] [FOLDER]

Options:
  --lang <id>          Interface language (e.g. en-US, fr)
  --config-dir <dir>   Directory holding settings.toml
  -h, --help           Print this help
";

fn main() -> iced::Result {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("iced_cull=info"))
        .init();

    let mut args = pico_args::Arguments::from_env();

    if args.contains(["-h", "--help"]) {
        print!("{HELP}");
        return Ok(());
    }

    let lang: Option<String> = args.opt_value_from_str("--lang").unwrap_or_else(|err| {
        log::warn!("Ignoring invalid --lang: {err}");
        None
    });
    let config_dir: Option<String> = args.opt_value_from_str("--config-dir").unwrap_or_else(|err| {
        log::warn!("Ignoring invalid --config-dir: {err}");
        None
    });

    paths::init_cli_overrides(config_dir);

    let flags = Flags {
        lang,
        folder: args
            .finish()
            .into_iter()
            .next()
            .and_then(|s| s.into_string().ok()),
    };

    app::run(flags)
}

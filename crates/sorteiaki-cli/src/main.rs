#![forbid(unsafe_code)]

fn main() -> std::process::ExitCode {
    sorteiaki_cli::main_entry()
}

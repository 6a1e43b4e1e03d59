#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

fn main() {
    #[cfg(target_os = "windows")]
    glasspane::platform::windows::run();

    #[cfg(not(target_os = "windows"))]
    {
        glasspane::logging::init(false);
        tracing::error!("glasspane only runs on Windows");
        std::process::exit(1);
    }
}

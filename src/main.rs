mod app;
mod chain;
mod components;
mod config;
mod context;
mod error;
mod hooks;
mod models;
mod services;
mod store;
mod utils;
#[cfg(test)]
mod test_utils;

use app::App;

fn main() {
    console_error_panic_hook::set_once();
    wasm_logger::init(wasm_logger::Config::default());
    log::info!("Starting wallet dashboard");
    yew::Renderer::<App>::new().render();
}

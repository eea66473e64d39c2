//! Persisted Cell demo entry point
//!
//! Counts visits in a cell persisted under `count`: LocalStorage on the web,
//! a JSON file natively (path from the first argument).

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_demo {
    use persisted_cell::storage::LocalStorage;
    use persisted_cell::{CellConfig, PersistedCell};

    pub fn run() -> Result<u64, Box<dyn std::error::Error>> {
        let storage = LocalStorage::local()?;
        let config = CellConfig::default().with_namespace("persisted_cell_");
        let mut visits = PersistedCell::with_config("count", 0u64, storage, config)?;

        if let Some(document) = web_sys::window().and_then(|w| w.document()) {
            visits.subscribe(move |n| {
                if let Some(el) = document.get_element_by_id("visits") {
                    el.set_text_content(Some(&n.to_string()));
                }
            });
        }

        visits.update(|n| n + 1)?;
        Ok(*visits.value())
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    console_error_panic_hook::set_once();
    if console_log::init_with_level(log::Level::Info).is_err() {
        web_sys::console::warn_1(&"Logger already initialized".into());
    }

    log::info!("Persisted Cell demo starting...");
    match wasm_demo::run() {
        Ok(n) => log::info!("Visit #{}", n),
        Err(e) => log::error!("Demo failed: {}", e),
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use persisted_cell::storage::FileStore;
    use persisted_cell::{CellConfig, PersistedCell};

    env_logger::init();

    let path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "persisted_cell.json".to_string());
    let config = CellConfig::from_env();
    log::info!("Persisted Cell (native) using {}", path);

    let store = FileStore::open(&path);
    let result = PersistedCell::with_config("count", 0u64, store, config)
        .and_then(|mut visits| visits.update(|n| n + 1).map(|()| *visits.value()));

    match result {
        Ok(n) => println!("Visit #{} (stored in {})", n, path),
        Err(e) => {
            log::error!("{}", e);
            eprintln!("error: {}", e);
            std::process::exit(1);
        }
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

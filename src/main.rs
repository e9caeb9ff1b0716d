//! Beta Toggles entry point
//!
//! Browser builds mount the settings panel and wire it to the shared store;
//! native builds run a small self-check demo.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_app {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{Document, Element, HtmlInputElement};

    use beta_toggles::{FeatureState, FeatureToggleStore, LocalStorage};

    /// One store for the whole session, shared with every handler
    type SharedStore = Rc<RefCell<FeatureToggleStore>>;

    pub fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Beta toggles panel starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        let store: SharedStore = Rc::new(RefCell::new(FeatureToggleStore::new(
            LocalStorage::new(),
        )));

        // The panel is mounted now: merge persisted state onto the defaults.
        store.borrow_mut().initialize_features();

        setup_engineering_toggle(&document, store.clone());
        render_panel(&document, &store);

        log::info!("Beta toggles panel ready");
    }

    /// Rebuild the feature list under #feature-panel
    fn render_panel(document: &Document, store: &SharedStore) {
        let panel = match document.get_element_by_id("feature-panel") {
            Some(panel) => panel,
            None => {
                log::warn!("No #feature-panel element to render into");
                return;
            }
        };
        panel.set_inner_html("");

        let (engineering_mode, features) = {
            let store = store.borrow();
            (store.engineering_mode, store.features().to_vec())
        };

        for feature in features {
            // Engineering features stay hidden until the host flips the gate.
            if feature.engineering && !engineering_mode {
                continue;
            }
            match feature_row(document, store, &feature) {
                Ok(row) => {
                    let _ = panel.append_child(&row);
                }
                Err(e) => log::error!("Failed to render feature row: {:?}", e),
            }
        }
    }

    /// Build one settings row: checkbox, title, description
    fn feature_row(
        document: &Document,
        store: &SharedStore,
        feature: &FeatureState,
    ) -> Result<Element, JsValue> {
        let row = document.create_element("div")?;
        row.set_attribute("class", "feature-row")?;

        let checkbox: HtmlInputElement = document.create_element("input")?.dyn_into()?;
        checkbox.set_type("checkbox");
        checkbox.set_checked(feature.enabled);
        checkbox.set_id(&format!("feature-{}", feature.id));

        {
            let store = store.clone();
            let document = document.clone();
            let id = feature.id.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                store.borrow_mut().toggle_feature(&id);
                render_panel(&document, &store);
            });
            let _ = checkbox
                .add_event_listener_with_callback("change", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        let title = document.create_element("span")?;
        title.set_attribute("class", "feature-title")?;
        title.set_text_content(Some(&feature.title));

        let description = document.create_element("p")?;
        description.set_attribute("class", "feature-description")?;
        description.set_text_content(Some(&feature.description));

        row.append_child(&checkbox)?;
        row.append_child(&title)?;
        row.append_child(&description)?;
        Ok(row)
    }

    /// Wire the host-provided engineering mode checkbox, if the page has one
    ///
    /// The store never mutates `engineering_mode` itself; this checkbox is
    /// the external controller.
    fn setup_engineering_toggle(document: &Document, store: SharedStore) {
        if let Some(el) = document.get_element_by_id("engineering-mode") {
            let checkbox: HtmlInputElement = match el.dyn_into() {
                Ok(checkbox) => checkbox,
                Err(_) => {
                    log::warn!("#engineering-mode is not an input element");
                    return;
                }
            };

            let handle = checkbox.clone();
            let document = document.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                let on = handle.checked();
                store.borrow_mut().engineering_mode = on;
                log::info!("Engineering mode: {}", on);
                render_panel(&document, &store);
            });
            let _ = checkbox
                .add_event_listener_with_callback("change", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_app::run();
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Beta Toggles (native) starting...");
    log::info!("Native mode has no browser storage - run with `trunk serve` for the web panel");

    // Run demo
    println!("\nRunning toggle round-trip...");
    demo_toggle_roundtrip();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
fn demo_toggle_roundtrip() {
    use beta_toggles::{FeatureFlag, FeatureToggleStore, MemoryStorage};

    let storage = MemoryStorage::new();
    let mut store = FeatureToggleStore::new(storage.clone());
    store.initialize_features();

    println!("\nFeature toggles:");
    for feature in store.features() {
        let mark = if feature.enabled { "x" } else { " " };
        let eng = if feature.engineering { " (engineering)" } else { "" };
        println!("  [{}] {}{} - {}", mark, feature.title, eng, feature.description);
    }

    store.toggle_feature(FeatureFlag::Extensions.id());
    assert!(store.is_feature_enabled(FeatureFlag::Extensions.id()));

    // A second store over the same storage picks the toggle up on init.
    let mut reloaded = FeatureToggleStore::new(storage);
    reloaded.initialize_features();
    assert!(reloaded.is_feature_enabled(FeatureFlag::Extensions.id()));

    println!("✓ Toggle persisted across store reload!");
}

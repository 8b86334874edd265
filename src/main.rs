//! Trash Sweep entry point
//!
//! Binds the game to the page on wasm32; natively runs a headless demo.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::collections::HashMap;
    use std::rc::{Rc, Weak};

    use glam::Vec2;
    use wasm_bindgen::prelude::*;
    use web_sys::{Document, Element, HtmlElement};

    use trash_sweep::platform::{Scheduler, Surface};
    use trash_sweep::sim::{ClockTicket, Item, ItemId, MotionFrame, MotionPhase};
    use trash_sweep::{GameConfig, GameController};

    type Game = GameController<DomSurface, DomScheduler>;

    /// Attribute linking an item node back to its item
    const ITEM_ID_ATTR: &str = "data-item-id";
    /// Class marking a target mid backward swing
    const BACK_CLASS: &str = "back";
    /// Class hiding the end-of-game dialog
    const POPUP_HIDE_CLASS: &str = "pop-up--hide";

    fn find(document: &Document, selector: &str) -> Result<HtmlElement, JsValue> {
        document
            .query_selector(selector)?
            .and_then(|el| el.dyn_into::<HtmlElement>().ok())
            .ok_or_else(|| JsValue::from_str(&format!("missing element {}", selector)))
    }

    fn set_visible(el: &HtmlElement, visible: bool) {
        let value = if visible { "visible" } else { "hidden" };
        let _ = el.style().set_property("visibility", value);
    }

    /// Item id of the node an event hit, if it is an item
    fn item_id_of(event: &web_sys::Event) -> Option<ItemId> {
        let target = event.target()?.dyn_into::<Element>().ok()?;
        target.get_attribute(ITEM_ID_ATTR)?.parse().ok()
    }

    /// DOM-backed surface over the page's game markup
    struct DomSurface {
        document: Document,
        field: HtmlElement,
        button: HtmlElement,
        timer: HtmlElement,
        score: HtmlElement,
        popup: HtmlElement,
        popup_text: HtmlElement,
    }

    impl DomSurface {
        fn new(document: &Document) -> Result<Self, JsValue> {
            Ok(Self {
                document: document.clone(),
                field: find(document, ".game__field")?,
                button: find(document, ".game__button")?,
                timer: find(document, ".game__timer")?,
                score: find(document, ".game__score")?,
                popup: find(document, ".pop-up")?,
                popup_text: find(document, ".pop-up__message")?,
            })
        }

        fn item_node(&self, id: ItemId) -> Option<HtmlElement> {
            self.field
                .query_selector(&format!("[{}=\"{}\"]", ITEM_ID_ATTR, id))
                .ok()
                .flatten()
                .and_then(|el| el.dyn_into::<HtmlElement>().ok())
        }
    }

    impl Surface for DomSurface {
        fn field_size(&self) -> Vec2 {
            let rect = self.field.get_bounding_client_rect();
            Vec2::new(rect.width() as f32, rect.height() as f32)
        }

        fn clear_items(&mut self) {
            self.field.set_inner_html("");
        }

        fn add_item(&mut self, item: &Item) {
            let node = match self.document.create_element("img") {
                Ok(node) => node,
                Err(e) => {
                    log::error!("Failed to create item node: {:?}", e);
                    return;
                }
            };
            let _ = node.set_attribute("class", item.kind.class_name());
            let _ = node.set_attribute("src", &item.asset);
            let _ = node.set_attribute(ITEM_ID_ATTR, &item.id.to_string());

            if let Ok(node) = node.dyn_into::<HtmlElement>() {
                let style = node.style();
                let _ = style.set_property("position", "absolute");
                let _ = style.set_property("top", &format!("{}px", item.pos.y));
                let _ = style.set_property("left", &format!("{}px", item.pos.x));
                let _ = self.field.append_child(&node);
            }
        }

        fn remove_item(&mut self, id: ItemId) {
            if let Some(node) = self.item_node(id) {
                node.remove();
            }
        }

        fn apply_motion(&mut self, frame: MotionFrame) {
            let Some(node) = self.item_node(frame.id) else {
                return;
            };
            let classes = node.class_list();
            let _ = match frame.phase {
                MotionPhase::Forward => classes.remove_1(BACK_CLASS),
                MotionPhase::Backward => classes.add_1(BACK_CLASS),
            };
            let _ = node
                .style()
                .set_property("margin-left", &format!("{}px", frame.margin));
        }

        fn show_score(&mut self, _score: u32, remaining: u32) {
            self.score.set_inner_text(&remaining.to_string());
        }

        fn show_timer(&mut self, text: &str) {
            self.timer.set_inner_text(text);
        }

        fn show_hud(&mut self) {
            set_visible(&self.timer, true);
            set_visible(&self.score, true);
        }

        fn show_control(&mut self, label: &str) {
            if let Ok(Some(icon)) = self.button.query_selector("span") {
                icon.set_inner_html(label);
            }
            set_visible(&self.button, true);
        }

        fn hide_control(&mut self) {
            set_visible(&self.button, false);
        }

        fn show_dialog(&mut self, message: &str) {
            self.popup_text.set_inner_text(message);
            let _ = self.popup.class_list().remove_1(POPUP_HIDE_CLASS);
        }

        fn hide_dialog(&mut self) {
            let _ = self.popup.class_list().add_1(POPUP_HIDE_CLASS);
        }
    }

    /// setInterval/setTimeout scheduler calling back into the game
    struct DomScheduler {
        game: Weak<RefCell<Game>>,
        intervals: HashMap<ClockTicket, (i32, Closure<dyn FnMut()>)>,
        /// Cancelled interval closures; one may still be on the stack
        retired: Vec<Closure<dyn FnMut()>>,
    }

    impl DomScheduler {
        fn new(game: Weak<RefCell<Game>>) -> Self {
            Self {
                game,
                intervals: HashMap::new(),
                retired: Vec::new(),
            }
        }
    }

    impl Scheduler for DomScheduler {
        fn start_interval(&mut self, ticket: ClockTicket, period_ms: u32) {
            self.retired.clear();

            let Some(window) = web_sys::window() else {
                return;
            };
            let game = self.game.clone();
            let closure = Closure::<dyn FnMut()>::new(move || {
                with_game(&game, |g| {
                    g.on_clock_tick(ticket);
                });
            });
            match window.set_interval_with_callback_and_timeout_and_arguments_0(
                closure.as_ref().unchecked_ref(),
                period_ms as i32,
            ) {
                Ok(handle) => {
                    self.intervals.insert(ticket, (handle, closure));
                }
                Err(e) => log::error!("setInterval failed: {:?}", e),
            }
        }

        fn cancel_interval(&mut self, ticket: ClockTicket) {
            if let Some((handle, closure)) = self.intervals.remove(&ticket) {
                if let Some(window) = web_sys::window() {
                    window.clear_interval_with_handle(handle);
                }
                self.retired.push(closure);
            }
        }

        fn defer_motion(&mut self, session_id: u64) {
            let Some(window) = web_sys::window() else {
                return;
            };
            let game = self.game.clone();
            let callback = Closure::once_into_js(move || {
                with_game(&game, |g| g.on_motion_ready(session_id));
            });
            if let Err(e) = window
                .set_timeout_with_callback_and_timeout_and_arguments_0(callback.unchecked_ref(), 0)
            {
                log::error!("setTimeout failed: {:?}", e);
            }
        }
    }

    /// Run `f` against the game if it is still alive and not mid-handler
    fn with_game(game: &Weak<RefCell<Game>>, f: impl FnOnce(&mut Game)) {
        let Some(game) = game.upgrade() else {
            return;
        };
        match game.try_borrow_mut() {
            Ok(mut g) => f(&mut g),
            Err(_) => log::warn!("Game busy, dropping callback"),
        }
    }

    pub fn run() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info)
            .map_err(|e| JsValue::from_str(&e.to_string()))?;

        log::info!("Trash Sweep starting...");

        let window = web_sys::window().ok_or("no window")?;
        let document = window.document().ok_or("no document")?;

        let surface = DomSurface::new(&document)?;
        let config =
            GameConfig::from_json_or_default(surface.field.get_attribute("data-config").as_deref());

        let seed = js_sys::Date::now() as u64;
        let game: Rc<RefCell<Game>> = Rc::new_cyclic(|weak| {
            RefCell::new(GameController::new(
                config,
                surface,
                DomScheduler::new(weak.clone()),
                seed,
            ))
        });
        log::info!("Game initialized with seed: {}", seed);

        setup_field_handlers(&document, game.clone())?;
        setup_buttons(&document, game)?;

        log::info!("Trash Sweep ready");
        Ok(())
    }

    fn setup_field_handlers(document: &Document, game: Rc<RefCell<Game>>) -> Result<(), JsValue> {
        let field = find(document, ".game__field")?;

        // Clicks on items (or the background)
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::Event| {
                let target = item_id_of(&event);
                let outcome = game.borrow_mut().on_field_click(target);
                log::debug!("Field click {:?} -> {:?}", target, outcome);
            });
            field.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        // Swing finished: queue the next one
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::Event| {
                if let Some(id) = item_id_of(&event) {
                    game.borrow_mut().on_transition_end(id);
                }
            });
            field.add_event_listener_with_callback(
                "transitionend",
                closure.as_ref().unchecked_ref(),
            )?;
            closure.forget();
        }

        Ok(())
    }

    fn setup_buttons(document: &Document, game: Rc<RefCell<Game>>) -> Result<(), JsValue> {
        // Start/stop button
        {
            let button = find(document, ".game__button")?;
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                game.borrow_mut().toggle();
            });
            button.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        // Replay from the dialog
        {
            let refresh = find(document, ".pop-up__refresh")?;
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                game.borrow_mut().replay();
            });
            refresh.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        Ok(())
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() -> Result<(), JsValue> {
    wasm_game::run()
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Trash Sweep (native) starting...");
    log::info!("Native mode plays headless demo sessions - serve the wasm build for the real game");

    let config = trash_sweep::GameConfig::load();
    let seed = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0);

    demo::run(config, seed);
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
mod demo {
    use trash_sweep::platform::{HeadlessScheduler, HeadlessSurface};
    use trash_sweep::sim::ItemKind;
    use trash_sweep::{GameConfig, GameController};

    type Game = GameController<HeadlessSurface, HeadlessScheduler>;

    fn pump_deferred(game: &mut Game) {
        for id in game.scheduler_mut().take_deferred() {
            game.on_motion_ready(id);
        }
    }

    /// Play one sweeping session and one idle session
    pub fn run(config: GameConfig, seed: u64) {
        let mut game = GameController::new(
            config,
            HeadlessSurface::new(800.0, 400.0),
            HeadlessScheduler::new(),
            seed,
        );

        // Sweep every target, one second per click
        game.toggle();
        pump_deferred(&mut game);
        for id in game.field().ids_of(ItemKind::Target) {
            if let Some(motion) = game.surface().motion.get(&id) {
                log::debug!("Target {} swinging {:?}", id, motion);
            }
            game.on_transition_end(id);
            game.on_field_click(Some(id));
            if !game.session().is_running() {
                break;
            }
            if let Some(ticket) = game.scheduler().active_interval() {
                game.on_clock_tick(ticket);
            }
        }
        println!(
            "Sweep session: {:?}, score {}, timer {}, dialog {:?}",
            game.status(),
            game.score(),
            game.surface().timer_text,
            game.surface().dialog
        );

        // Hands off until the clock runs out
        game.replay();
        pump_deferred(&mut game);
        while let Some(ticket) = game.scheduler().active_interval() {
            game.on_clock_tick(ticket);
        }
        println!(
            "Idle session: {:?}, score {}, timer {}, dialog {:?}",
            game.status(),
            game.score(),
            game.surface().timer_text,
            game.surface().dialog
        );
    }
}

use anyhow::Result;
use gpui::{
    AnyView, App, AppContext, Bounds, Context, KeyBinding, Menu, MenuItem, WindowBounds,
    WindowOptions,
};
use gpui_component::Root;
use tracing::info;

use crate::{
    Quit,
    components::{CalculatorWindow, WindowPreferences},
    quit,
};

pub fn setup_app(app_cx: &mut App) {
    // This must be called before using any GPUI Component features.
    gpui_component::init(app_cx);

    app_cx.activate(true);

    #[cfg(target_os = "macos")]
    app_cx.bind_keys([KeyBinding::new("cmd-q", Quit, None)]);

    #[cfg(not(target_os = "macos"))]
    app_cx.bind_keys([
        KeyBinding::new("ctrl-q", Quit, None),
        KeyBinding::new("alt-F4", Quit, None),
    ]);

    app_cx.on_action(quit);

    app_cx.set_menus(vec![Menu {
        name: "Tip Calculator".into(),
        items: vec![MenuItem::action("Quit", Quit)],
    }]);
}

/// Opens the calculator window centered on the primary display.
pub fn open_main_window(
    app_cx: &mut App,
    prefs: WindowPreferences,
) -> Result<()> {
    let bounds = Bounds::centered(None, prefs.size, app_cx);
    let options = WindowOptions {
        window_bounds: Some(WindowBounds::Windowed(bounds)),
        ..Default::default()
    };

    app_cx.open_window(options, |window, cx| {
        let view = cx.new(|view_cx: &mut Context<CalculatorWindow>| {
            CalculatorWindow::new(window, view_cx)
        });
        let root_view: AnyView = view.into();
        cx.new(|root_cx| Root::new(root_view, window, root_cx))
    })?;

    info!(width = ?prefs.size.width, height = ?prefs.size.height, "Calculator window opened");
    Ok(())
}

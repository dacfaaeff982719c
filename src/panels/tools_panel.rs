use crate::CanvasApp;
use crate::components::ToolButton;

pub fn tools_panel(app: &mut CanvasApp, ctx: &egui::Context) {
    egui::SidePanel::left("tools_panel")
        .resizable(false)
        .exact_width(48.0)
        .show(ctx, |ui| {
            ui.vertical_centered(|ui| {
                // Copy out so the session can be mutated from the click handler
                let controls = app.session.controls().controls().to_vec();
                for control in controls {
                    if ToolButton::new(control).show(ui).clicked() {
                        app.session.select_tool(control.tool);
                    }
                }
            });
        });
}

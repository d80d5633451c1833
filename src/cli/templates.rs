use std::path::PathBuf;

use clap::Parser;

use crate::core::TemplatePaths;

#[derive(Parser)]
pub struct TemplateArgs {
    /// Baseline simulation parameters of the 2-panel aerator.
    #[clap(
        long = "two-panel-template",
        env = "TWO_PANEL_TEMPLATE",
        default_value = "2-Panel_pvsamv1.json"
    )]
    two_panel: PathBuf,

    /// Baseline simulation parameters of the 4-panel aerator.
    #[clap(
        long = "four-panel-template",
        env = "FOUR_PANEL_TEMPLATE",
        default_value = "4-Panel_pvsamv1.json"
    )]
    four_panel: PathBuf,
}

impl TemplateArgs {
    pub fn paths(&self) -> TemplatePaths {
        TemplatePaths { two_panel: self.two_panel.clone(), four_panel: self.four_panel.clone() }
    }
}

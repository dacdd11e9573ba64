use bingo_core::{BingoTile, PngExportSettings};
use serde::Deserialize;

/// Board sent from the page: the grid plus the export dialog's settings.
#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BoardDocument {
    pub dimension: usize,
    pub board: Vec<BingoTile>,
    pub settings: Option<PngExportSettings>,
}

impl BoardDocument {
    pub fn settings(&self) -> PngExportSettings {
        self.settings
            .clone()
            .unwrap_or_else(|| PngExportSettings::for_dimension(self.dimension))
    }
}

/// UI layer: control panel, chart rendering, donut chart, preview table.
pub mod panels;
pub mod pie;
pub mod plot;
pub mod table;

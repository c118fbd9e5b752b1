pub mod config;
pub mod graph;

pub use config::{GraphConfig, GraphOutputType};
pub use graph::{gnuplot_data, gnuplot_script, render_box_plots};

use super::config::GraphConfig;
use crate::errors::{GradeError, Result};
use crate::report::Report;

use fs_err as fs;
use tracing::{debug, info, warn};

use std::ffi::OsString;
use std::fmt::Write;
use std::path::{Path, PathBuf};
use std::process::Command;

const DATA_APPENDIX: &str = ".dat";
const GRAPH_CONFIG_APPENDIX: &str = ".gpi";
const BOX_HALF_HEIGHT: f64 = 0.3;
const CAP_HALF_HEIGHT: f64 = 0.15;

fn with_appendix(path: &Path, appendix: &str) -> PathBuf {
    let mut name: OsString = path.as_os_str().to_owned();
    name.push(appendix);
    PathBuf::from(name)
}

fn quote(text: &str) -> String {
    format!("\"{}\"", text.replace('\\', "\\\\").replace('"', "\\\""))
}

/// One line per report row: position (starting at 1), minimum, first
/// quartile, median, third quartile, maximum.
pub fn gnuplot_data(report: &Report) -> String {
    let mut data = String::new();
    for (i, row) in report.rows().iter().enumerate() {
        let values = row
            .summary
            .values()
            .iter()
            .map(|value| value.to_string())
            .collect::<Vec<String>>()
            .join(" ");
        _ = writeln!(data, "{} {}", i + 1, values);
    }
    data
}

/// Horizontal box plots, first row on top, whiskers spanning the full range.
pub fn gnuplot_script(
    report: &Report,
    config: &GraphConfig,
    output_path: &Path,
    data_path: &Path,
) -> String {
    let output_type = config.output_type_for(output_path);
    let data = quote(&data_path.display().to_string());

    let mut gnuplot_str = String::new();
    gnuplot_str.push_str(format!("set terminal {}\n", output_type.terminal()).as_str());
    gnuplot_str
        .push_str(format!("set output {}\n", quote(&output_path.display().to_string())).as_str());
    gnuplot_str.push_str("set termoption noenhanced\n");
    gnuplot_str.push_str("unset key\n");
    gnuplot_str.push('\n');
    gnuplot_str.push_str("# Labels\n");
    gnuplot_str.push_str(format!("set xlabel {}\n", quote(&config.x_label)).as_str());
    let tics = report
        .rows()
        .iter()
        .enumerate()
        .map(|(i, row)| format!("{} {}", quote(&row.label), i + 1))
        .collect::<Vec<String>>()
        .join(", ");
    gnuplot_str.push_str(format!("set ytics ({})\n", tics).as_str());
    gnuplot_str.push('\n');
    gnuplot_str.push_str("# Ranges\n");
    let x_end = config
        .x_end
        .map_or_else(|| String::from("*"), |x_end| x_end.to_string());
    gnuplot_str.push_str(format!("set xrange [{}:{}]\n", config.x_start, x_end).as_str());
    gnuplot_str.push_str(format!("set yrange [{}:0.5]\n", report.len() as f64 + 0.5).as_str());
    if config.grid {
        gnuplot_str.push_str("set grid\n");
    }
    gnuplot_str.push('\n');
    gnuplot_str.push_str("set style fill solid 0.25 border\n");
    gnuplot_str.push_str("plot ");
    gnuplot_str.push_str(
        format!(
            "{} using 4:1:3:5:($1-{h}):($1+{h}) with boxxyerror lc rgb \"#1f77b4\", \\\n",
            data,
            h = BOX_HALF_HEIGHT
        )
        .as_str(),
    );
    gnuplot_str
        .push_str("\t\"\" using 2:1:($3-$2):(0) with vectors nohead lc rgb \"black\", \\\n");
    gnuplot_str
        .push_str("\t\"\" using 5:1:($6-$5):(0) with vectors nohead lc rgb \"black\", \\\n");
    for column in [2, 6] {
        gnuplot_str.push_str(
            format!(
                "\t\"\" using {}:($1-{h}):(0):({w}) with vectors nohead lc rgb \"black\", \\\n",
                column,
                h = CAP_HALF_HEIGHT,
                w = 2.0 * CAP_HALF_HEIGHT
            )
            .as_str(),
        );
    }
    gnuplot_str.push_str(
        format!(
            "\t\"\" using 4:($1-{h}):(0):({w}) with vectors nohead lw 2 lc rgb \"#ff7f0e\"\n",
            h = BOX_HALF_HEIGHT,
            w = 2.0 * BOX_HALF_HEIGHT
        )
        .as_str(),
    );
    gnuplot_str
}

fn run_gnuplot(gnuplot: &Path, script_path: &Path) -> Result<()> {
    let output = Command::new(gnuplot)
        .arg(script_path)
        .output()
        .map_err(|e| GradeError::Plot(format!("cannot run {}: {}", gnuplot.display(), e)))?;
    if !output.status.success() {
        return Err(GradeError::Plot(format!(
            "{} exited with {}: {}",
            gnuplot.display(),
            output.status,
            String::from_utf8_lossy(&output.stderr).trim()
        )));
    }
    Ok(())
}

fn clean(paths: &[&Path]) -> Result<()> {
    for path in paths {
        if path.is_file() {
            fs::remove_file(path)?;
        }
    }
    Ok(())
}

/// Draws one box plot per report row into `output_path` using gnuplot.
pub fn render_box_plots(report: &Report, output_path: &Path, config: &GraphConfig) -> Result<()> {
    if report.is_empty() {
        warn!("no courses to plot, skipping {}", output_path.display());
        return Ok(());
    }

    let data_path = with_appendix(output_path, DATA_APPENDIX);
    let script_path = with_appendix(output_path, GRAPH_CONFIG_APPENDIX);

    fs::write(&data_path, gnuplot_data(report))?;
    fs::write(
        &script_path,
        gnuplot_script(report, config, output_path, &data_path),
    )?;
    debug!(script = %script_path.display(), "generated gnuplot files");

    let result = run_gnuplot(&config.gnuplot, &script_path);
    if !config.save_temp_files {
        clean(&[&data_path, &script_path])?;
    }
    result?;

    info!(output = %output_path.display(), rows = report.len(), "wrote box plots");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::redaction::REDACTION_TOKEN;
    use crate::report::assemble;
    use crate::sample::Sample;

    fn report() -> Report {
        let kept = Sample::new("MATH \"151\"", vec![1.0, 2.0, 3.0, 4.0, 5.0]);
        let redacted = Sample::new("PHYS 221", vec![0.5]);
        assemble(&[(&kept, kept.code()), (&redacted, REDACTION_TOKEN)]).unwrap()
    }

    #[test]
    fn test_data_rows_follow_report_order() {
        assert_eq!(gnuplot_data(&report()), "1 1 2 3 4 5\n2 0.5 0.5 0.5 0.5 0.5\n");
    }

    #[test]
    fn test_script() {
        let config = GraphConfig {
            x_end: Some(1.5),
            ..GraphConfig::default()
        };
        let script = gnuplot_script(
            &report(),
            &config,
            Path::new("out/plots.svg"),
            Path::new("out/plots.svg.dat"),
        );

        assert!(script.starts_with("set terminal svg\nset output \"out/plots.svg\"\n"));
        assert!(script.contains("set xlabel \"Percent Grade\"\n"));
        assert!(script.contains("set ytics (\"MATH \\\"151\\\"\" 1, \"Redacted\" 2)\n"));
        assert!(script.contains("set xrange [0:1.5]\n"));
        assert!(script.contains("set yrange [2.5:0.5]\n"));
        assert!(script.contains("set grid\n"));
        assert!(script.contains("plot \"out/plots.svg.dat\" using 4:1:3:5"));
    }

    #[test]
    fn test_missing_gnuplot_is_a_plot_error() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("plots.png");
        let config = GraphConfig {
            gnuplot: dir.path().join("no-such-gnuplot"),
            ..GraphConfig::default()
        };

        let result = render_box_plots(&report(), &output, &config);

        assert!(matches!(result, Err(GradeError::Plot(_))));
        assert!(!with_appendix(&output, DATA_APPENDIX).exists());
        assert!(!with_appendix(&output, GRAPH_CONFIG_APPENDIX).exists());
    }

    #[test]
    fn test_save_temp_files() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("plots.png");
        let config = GraphConfig {
            gnuplot: dir.path().join("no-such-gnuplot"),
            save_temp_files: true,
            ..GraphConfig::default()
        };

        _ = render_box_plots(&report(), &output, &config);

        let data = fs::read_to_string(with_appendix(&output, DATA_APPENDIX)).unwrap();
        assert_eq!(data, gnuplot_data(&report()));
        assert!(with_appendix(&output, GRAPH_CONFIG_APPENDIX).is_file());
    }

    #[test]
    fn test_empty_report_is_skipped() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("plots.png");

        render_box_plots(&Report::default(), &output, &GraphConfig::default()).unwrap();
        assert!(!with_appendix(&output, DATA_APPENDIX).exists());
    }
}

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use comfy_table::{Cell, ContentArrangement, Table, presets::NOTHING};
use log::{info, warn};

use sidfreq::pitch::cents_between;
use sidfreq::retune::start_note;
use sidfreq::scan::split_match_groups;
use sidfreq::sid::{file_offset, split_sid};
use sidfreq::{Detection, TableLayout, TuneConfig, TuneError, detect_table, retune_sid};

/// Suffix appended to the input stem when no output path is given.
const OUTPUT_SUFFIX: &str = "_MODIFIED_TABLE.sid";

pub struct RetuneOptions {
    pub output: Option<PathBuf>,
    pub dry_run: bool,
    pub copy_on_miss: bool,
}

pub fn read_sid_file(path: &Path) -> Result<Vec<u8>> {
    fs::read(path).with_context(|| format!("failed to read file: {}", path.display()))
}

/// `<stem>_MODIFIED_TABLE.sid` in the working directory.
fn default_output_path(input: &Path) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "out".to_string());
    PathBuf::from(format!("{}{}", stem, OUTPUT_SUFFIX))
}

/// Retune command: detect, rewrite, write the output file.
pub fn retune(input: &Path, data: Vec<u8>, cfg: &TuneConfig, opts: &RetuneOptions) -> Result<()> {
    let output = opts
        .output
        .clone()
        .unwrap_or_else(|| default_output_path(input));

    let (rewritten, report) = match retune_sid(&data, cfg) {
        Ok(r) => r,
        Err(TuneError::NoTableFound) if opts.copy_on_miss => {
            warn!("{}: no frequency table found, copying unmodified", input.display());
            if !opts.dry_run {
                write_output(&output, &data)?;
            }
            return Ok(());
        }
        Err(e) => {
            return Err(e).with_context(|| format!("failed to retune {}", input.display()));
        }
    };

    println!("{}", report.detection.table());
    println!(
        " first entry: 0x{:04X} (note {})",
        report.retune.first_freq, report.retune.start_note
    );
    println!(
        " retuned A4 {:.3} Hz -> {:.3} Hz ({:+.1} cents, {} bytes written, {} past end)",
        cfg.pitch.legacy_a4_hz,
        cfg.pitch.target_a4_hz,
        cents_between(cfg.pitch.legacy_a4_hz, cfg.pitch.target_a4_hz),
        report.retune.written,
        report.retune.skipped
    );

    if opts.dry_run {
        info!("dry run: {} not written", output.display());
        return Ok(());
    }
    write_output(&output, &rewritten)
}

fn write_output(path: &Path, bytes: &[u8]) -> Result<()> {
    fs::write(path, bytes).with_context(|| format!("failed to write file: {}", path.display()))?;
    info!("wrote {} ({} bytes)", path.display(), bytes.len());
    Ok(())
}

/// Scan command: detection only, printed as a key/value table.
pub fn scan(input: &Path, data: &[u8], cfg: &TuneConfig, show_groups: bool) -> Result<()> {
    let (_, body) = split_sid(data).with_context(|| format!("failed to read {}", input.display()))?;

    if show_groups {
        print_groups(body, cfg);
    }

    let detection = match detect_table(body, &cfg.scan) {
        Ok(d) => d,
        Err(TuneError::NoTableFound) => bail!("{}: no frequency table found", input.display()),
        Err(e) => return Err(e).context("scan failed"),
    };

    let mut rows: Vec<(String, String)> = Vec::new();
    let table = detection.table();
    match table.layout {
        TableLayout::Split { lo, hi } => {
            rows.push(("layout".into(), "split".into()));
            rows.push(("low bytes".into(), offsets(lo)));
            rows.push(("high bytes".into(), offsets(hi)));
        }
        TableLayout::Interleaved { start } => {
            rows.push(("layout".into(), "interleaved".into()));
            rows.push(("start".into(), offsets(start)));
        }
    }
    rows.push(("entries".into(), table.len.to_string()));

    match start_note(table, body, cfg.pitch.legacy_a4_hz) {
        Ok((freq, note)) => rows.push(("first entry".into(), format!("0x{:04X} (note {})", freq, note))),
        Err(e) => rows.push(("first entry".into(), e.to_string())),
    }

    match &detection {
        Detection::Split(m) => {
            rows.push(("stream distance".into(), m.distance.to_string()));
            rows.push((
                "group".into(),
                format!("{} hits ({} significant groups)", m.group_size, m.significant_groups),
            ));
            rows.push((
                "staircase".into(),
                format!(
                    "{} at lo=0x{:X} hi=0x{:X}{}",
                    m.run_len,
                    m.unrefined.0,
                    m.unrefined.1,
                    if m.partial_run { " (partial)" } else { "" }
                ),
            ));
            rows.push(("refinement".into(), format!("{:+}", m.refine_shift)));
            rows.push(("probe hits".into(), m.probe_hits.to_string()));
        }
        Detection::Interleaved(m) => {
            rows.push(("staircase".into(), m.run_len.to_string()));
            rows.push(("probe hits".into(), m.probe_hits.to_string()));
        }
    }

    let mut out = Table::new();
    out.load_preset(NOTHING)
        .set_content_arrangement(ContentArrangement::Dynamic);
    for (k, v) in rows {
        out.add_row(vec![Cell::new(k), Cell::new(v)]);
    }
    println!("\"{}\"", input.display());
    println!("{}", out);

    Ok(())
}

/// "body (file)" offsets in hex.
fn offsets(body_offset: usize) -> String {
    format!("0x{:04X} (file 0x{:04X})", body_offset, file_offset(body_offset))
}

fn print_groups(body: &[u8], cfg: &TuneConfig) {
    let groups = split_match_groups(body, &cfg.scan);
    let mut out = Table::new();
    out.load_preset(NOTHING)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec!["distance", "hits", "first lo", "first hi"]);
    for g in &groups {
        let (lo, hi) = g.members()[0];
        out.add_row(vec![
            Cell::new(g.distance),
            Cell::new(g.len()),
            Cell::new(format!("0x{:04X}", lo)),
            Cell::new(format!("0x{:04X}", hi)),
        ]);
    }
    println!("split detector: {} distance groups", groups.len());
    println!("{}", out);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_output_path() {
        assert_eq!(
            default_output_path(Path::new("music/Commando.sid")),
            PathBuf::from("Commando_MODIFIED_TABLE.sid")
        );
    }

    #[test]
    fn test_offsets_include_header() {
        assert_eq!(offsets(0x10), "0x0010 (file 0x008E)");
    }
}

// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Bildwerk: command-line entry point.
//
// Input paths play the role of the file picker; `--out-dir` is where
// finished files are downloaded to.

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};

use bildwerk_core::human_errors::{Severity, humanize_error};
use bildwerk_core::{BildwerkError, Orientation, PaperSize, Quality, ToolConfig, ToolKind};
use bildwerk_document::{
    DirectoryDownload, DocumentConverter, ImageToPdfSession, PreviewEntry, RasterDecoder,
    StagedFile,
};

#[derive(Parser)]
#[command(name = "bildwerk", about = "Local image and PDF toolbox", version)]
struct Cli {
    /// JSON configuration file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Directory finished files are written to
    #[arg(long, global = true, default_value = ".")]
    out_dir: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Combine images into one PDF, one image per page
    Pdf {
        /// Images to stage, in page order
        #[arg(short, long, required = true, num_args = 1..)]
        input: Vec<PathBuf>,

        /// Remove the image shown at this preview position (repeatable)
        #[arg(long)]
        remove: Vec<usize>,

        /// Page size
        #[arg(long, value_enum)]
        paper: Option<PaperArg>,

        /// Landscape pages
        #[arg(long)]
        landscape: bool,

        /// Output file name
        #[arg(short, long)]
        output: Option<String>,
    },

    /// Recompress an image as JPEG
    Compress {
        /// Input image
        #[arg(short, long)]
        input: PathBuf,

        /// JPEG quality between 0 and 1
        #[arg(long)]
        quality: Option<f32>,

        /// Output file name
        #[arg(short, long)]
        output: Option<String>,
    },

    /// Convert an image to JPEG
    ToJpg {
        /// Input image
        #[arg(short, long)]
        input: PathBuf,

        /// Output file name
        #[arg(short, long)]
        output: Option<String>,
    },

    /// Convert an image to PNG
    ToPng {
        /// Input image
        #[arg(short, long)]
        input: PathBuf,

        /// Output file name
        #[arg(short, long)]
        output: Option<String>,
    },

    /// Shrink an existing PDF
    CompressPdf {
        /// Input PDF
        #[arg(short, long)]
        input: PathBuf,

        /// Output file name
        #[arg(short, long)]
        output: Option<String>,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum PaperArg {
    A4,
    A3,
    A5,
    Letter,
    Legal,
    Tabloid,
}

impl From<PaperArg> for PaperSize {
    fn from(arg: PaperArg) -> Self {
        match arg {
            PaperArg::A4 => Self::A4,
            PaperArg::A3 => Self::A3,
            PaperArg::A5 => Self::A5,
            PaperArg::Letter => Self::Letter,
            PaperArg::Legal => Self::Legal,
            PaperArg::Tabloid => Self::Tabloid,
        }
    }
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    match run(Cli::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            report(&err);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let mut config = match &cli.config {
        Some(path) => ToolConfig::load(path)
            .with_context(|| format!("failed to read config {}", path.display()))?,
        None => ToolConfig::default(),
    };
    let download = DirectoryDownload::new(&cli.out_dir);

    match cli.command {
        Commands::Pdf {
            input,
            remove,
            paper,
            landscape,
            output,
        } => {
            if let Some(paper) = paper {
                config.paper_size = paper.into();
            }
            if landscape {
                config.orientation = Orientation::Landscape;
            }
            let session = ImageToPdfSession::new(config);

            let files = input
                .iter()
                .map(StagedFile::open)
                .collect::<Result<Vec<_>, _>>()?;
            let mut preview = session.add(files)?;

            for index in remove {
                let handle = preview
                    .get(index)
                    .map(|entry| entry.remove)
                    .ok_or(BildwerkError::IndexOutOfRange {
                        index,
                        len: preview.len(),
                    })?;
                preview = session.remove(&handle)?;
            }
            print_preview(&preview);

            let report = session.commit(RasterDecoder, &download, output.as_deref())?;
            println!(
                "Saved {} page(s) to {} ({:.1} KB)",
                report.pages,
                report.location.display(),
                report.bytes as f64 / 1024.0
            );
        }

        Commands::Compress {
            input,
            quality,
            output,
        } => {
            if let Some(quality) = quality {
                config.compression_quality = Quality::new(quality);
            }
            run_tool(config, ToolKind::CompressImage, &input, output, &download)?;
        }
        Commands::ToJpg { input, output } => {
            run_tool(config, ToolKind::ConvertToJpeg, &input, output, &download)?;
        }
        Commands::ToPng { input, output } => {
            run_tool(config, ToolKind::ConvertToPng, &input, output, &download)?;
        }
        Commands::CompressPdf { input, output } => {
            run_tool(config, ToolKind::CompressPdf, &input, output, &download)?;
        }
    }

    Ok(())
}

fn run_tool(
    config: ToolConfig,
    tool: ToolKind,
    input: &Path,
    output: Option<String>,
    download: &DirectoryDownload,
) -> Result<()> {
    let file = StagedFile::open(input)?;
    let result =
        DocumentConverter::new(config).run(tool, file.name(), file.bytes(), output.as_deref())?;
    let location = result.save(download)?;

    println!("{}", result.size_summary());
    println!("Saved {} ({})", location.display(), result.tool.mime_type());
    Ok(())
}

fn print_preview(entries: &[PreviewEntry]) {
    println!("{} image(s) staged:", entries.len());
    for entry in entries {
        println!("  {entry}");
    }
}

fn report(err: &anyhow::Error) {
    let Some(err) = err.downcast_ref::<BildwerkError>() else {
        eprintln!("Error: {err:#}");
        return;
    };

    let human = humanize_error(err);
    let label = match human.severity {
        Severity::ActionRequired => "Action needed",
        Severity::Permanent => "Error",
        Severity::Internal => "Internal error",
    };
    eprintln!("{label}: {}", human.message);
    eprintln!("  {}", human.suggestion);
}

#[cfg(test)]
mod tests {
    use super::*;
    use bildwerk_document::ImageProcessor;
    use image::{DynamicImage, Rgb, RgbImage};

    fn write_png(dir: &Path, name: &str, width: u32, height: u32) -> PathBuf {
        let bytes = ImageProcessor::from_dynamic(DynamicImage::ImageRgb8(RgbImage::from_pixel(
            width,
            height,
            Rgb([90, 90, 200]),
        )))
        .to_png_bytes()
        .expect("encode");
        let path = dir.join(name);
        std::fs::write(&path, bytes).expect("write fixture");
        path
    }

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("bildwerk").chain(args.iter().copied()))
            .expect("parse")
    }

    #[test]
    fn pdf_command_writes_document_with_removals() {
        let dir = tempfile::tempdir().expect("tempdir");
        let a = write_png(dir.path(), "a.png", 40, 20);
        let b = write_png(dir.path(), "b.png", 20, 40);
        let c = write_png(dir.path(), "c.png", 30, 30);
        let out = dir.path().join("out");

        let cli = parse(&[
            "--out-dir",
            out.to_str().expect("utf8"),
            "pdf",
            "-i",
            a.to_str().expect("utf8"),
            b.to_str().expect("utf8"),
            c.to_str().expect("utf8"),
            "--remove",
            "1",
            "--paper",
            "letter",
        ]);
        run(cli).expect("run");

        let doc = lopdf::Document::load(out.join("images.pdf")).expect("load");
        assert_eq!(doc.get_pages().len(), 2);
    }

    #[test]
    fn removal_past_the_end_is_reported() {
        let dir = tempfile::tempdir().expect("tempdir");
        let a = write_png(dir.path(), "a.png", 10, 10);

        let cli = parse(&[
            "--out-dir",
            dir.path().to_str().expect("utf8"),
            "pdf",
            "-i",
            a.to_str().expect("utf8"),
            "--remove",
            "3",
        ]);
        let err = run(cli).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<BildwerkError>(),
            Some(BildwerkError::IndexOutOfRange { index: 3, len: 1 })
        ));
        assert!(!dir.path().join("images.pdf").exists());
    }

    #[test]
    fn single_file_tools_use_default_names() {
        let dir = tempfile::tempdir().expect("tempdir");
        let input = write_png(dir.path(), "photo.png", 64, 64);
        let out = dir.path().join("out");
        let out_dir = out.to_str().expect("utf8");
        let input = input.to_str().expect("utf8");

        run(parse(&["--out-dir", out_dir, "compress", "-i", input, "--quality", "0.5"]))
            .expect("compress");
        run(parse(&["--out-dir", out_dir, "to-jpg", "-i", input])).expect("to-jpg");
        run(parse(&["--out-dir", out_dir, "to-png", "-i", input, "-o", "copy.png"]))
            .expect("to-png");

        for name in ["compressed.jpg", "image.jpg", "copy.png"] {
            assert!(out.join(name).exists(), "{name} missing");
        }
    }

    #[test]
    fn config_file_overrides_default_name() {
        let dir = tempfile::tempdir().expect("tempdir");
        let input = write_png(dir.path(), "photo.png", 8, 8);
        let config = dir.path().join("bildwerk.json");
        std::fs::write(&config, r#"{ "filenames": { "images_pdf": "album.pdf" } }"#)
            .expect("write config");

        run(parse(&[
            "--config",
            config.to_str().expect("utf8"),
            "--out-dir",
            dir.path().to_str().expect("utf8"),
            "pdf",
            "-i",
            input.to_str().expect("utf8"),
        ]))
        .expect("run");

        assert!(dir.path().join("album.pdf").exists());
    }
}

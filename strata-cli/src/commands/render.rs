//! Render command implementation.
//!
//! This module implements the `render` command, which loads a single
//! layer file and prints it back, either exactly as stored
//! (demonstrating the lossless round-trip) or normalized via the
//! line-ending and whitespace options.

use crate::error::CliError;
use crate::utils::GlobalOptions;
use clap::{Args, ValueEnum};
use strata::{DiskStorage, Domain, FileProvider, FileReference, LineEnding};

/// Print one layer file, exactly as stored or normalized.
#[derive(Args)]
pub struct RenderCommand {
    /// Configuration category (e.g. Engine, Game); may be omitted only
    /// for the untyped engine-base layer
    #[arg(value_name = "TYPE")]
    pub type_name: Option<String>,

    /// Which hierarchy domain the layer belongs to
    #[arg(long, value_enum, default_value = "project", ignore_case = true)]
    pub domain: DomainArg,

    /// Platform the layer is scoped to
    #[arg(long, value_name = "PLATFORM")]
    pub platform: Option<String>,

    /// Normalize every line ending to this style
    #[arg(long, value_enum, value_name = "STYLE", ignore_case = true)]
    pub line_ending: Option<LineEndingArg>,

    /// Collapse every run of blank lines to a single blank line
    #[arg(long)]
    pub condense: bool,
}

/// User-facing domain names.
#[derive(Clone, Copy, ValueEnum)]
#[value(rename_all = "kebab-case")]
pub enum DomainArg {
    /// Engine-shipped base defaults
    EngineBase,
    /// Engine platform overrides
    Engine,
    /// Project settings
    Project,
    /// Generated project settings
    ProjectGenerated,
}

impl From<DomainArg> for Domain {
    fn from(arg: DomainArg) -> Self {
        match arg {
            DomainArg::EngineBase => Domain::EngineBase,
            DomainArg::Engine => Domain::Engine,
            DomainArg::Project => Domain::Project,
            DomainArg::ProjectGenerated => Domain::ProjectGenerated,
        }
    }
}

/// User-facing line-ending style names.
#[derive(Clone, Copy, ValueEnum)]
#[value(rename_all = "lowercase")]
pub enum LineEndingArg {
    /// `\n`
    Unix,
    /// `\r\n`
    Windows,
    /// `\r`
    Mac,
}

impl From<LineEndingArg> for LineEnding {
    fn from(arg: LineEndingArg) -> Self {
        match arg {
            LineEndingArg::Unix => LineEnding::Unix,
            LineEndingArg::Windows => LineEnding::Windows,
            LineEndingArg::Mac => LineEnding::Mac,
        }
    }
}

impl RenderCommand {
    /// Execute the render command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let domain = Domain::from(self.domain);
        if self.type_name.is_none() && domain != Domain::EngineBase {
            return Err(CliError::InvalidArguments(
                "TYPE is required for every domain except engine-base".to_string(),
            ));
        }

        let reference = FileReference::new(domain, self.platform.clone(), self.type_name.clone())
            .map_err(CliError::from)?;
        let provider = FileProvider::new(DiskStorage, global.layout()?);
        let (mut document, loaded) =
            provider.load_or_create(&reference).map_err(CliError::from)?;
        if !loaded {
            return Err(CliError::SemanticFailure(format!(
                "no file found for layer {reference}"
            )));
        }

        if self.condense {
            let newline = match self.line_ending {
                Some(arg) => arg.into(),
                None => document.auto_detect_line_ending(),
            };
            document.merge_consecutive_tokens();
            document.condense_whitespace(newline);
        }
        if let Some(arg) = self.line_ending {
            document.set_line_ending(arg.into());
        }

        print!("{}", document.render());
        Ok(())
    }
}

use buildcmp_core_types::RunId;
use thiserror::Error;

/// Result type alias using ExError
pub type Result<T> = std::result::Result<T, ExError>;

// ========== Error Facility ==========

/// Canonical error kind taxonomy
///
/// Each kind maps to a stable error code that can be used for programmatic
/// error handling, testing, and CLI exit reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExErrorKind {
    // Configuration
    /// Two outcomes in one outcome set share kind and name
    DuplicateOutcome,
    /// A handler was registered twice for the same kind
    DuplicateRegistration,
    /// An associated pair has a kind with no registered comparator
    NoComparator,
    /// A result section has no registered renderer
    NoRenderer,
    /// Neither build is able to produce an outcome model
    NoOutcomeModel,
    InvalidVersion,
    InvalidConfig,
    InvalidInput,

    // Comparison
    /// A comparator received outcomes of a kind it does not handle
    OutcomeKindMismatch,
    /// A comparator could not inspect the content of an outcome
    ComparisonFailed,

    // Rendering
    RenderFailed,

    // Extraction / execution
    InvalidModel,
    BuildExecutionFailed,
    FileStoreCollision,
    FileStoreMissing,

    // Integration/IO
    Io,
    Serialization,

    // Internal
    Internal,
}

impl ExErrorKind {
    /// Get the stable error code for this kind
    pub fn code(&self) -> &'static str {
        match self {
            ExErrorKind::DuplicateOutcome => "ERR_DUPLICATE_OUTCOME",
            ExErrorKind::DuplicateRegistration => "ERR_DUPLICATE_REGISTRATION",
            ExErrorKind::NoComparator => "ERR_NO_COMPARATOR",
            ExErrorKind::NoRenderer => "ERR_NO_RENDERER",
            ExErrorKind::NoOutcomeModel => "ERR_NO_OUTCOME_MODEL",
            ExErrorKind::InvalidVersion => "ERR_INVALID_VERSION",
            ExErrorKind::InvalidConfig => "ERR_INVALID_CONFIG",
            ExErrorKind::InvalidInput => "ERR_INVALID_INPUT",
            ExErrorKind::OutcomeKindMismatch => "ERR_OUTCOME_KIND_MISMATCH",
            ExErrorKind::ComparisonFailed => "ERR_COMPARISON_FAILED",
            ExErrorKind::RenderFailed => "ERR_RENDER_FAILED",
            ExErrorKind::InvalidModel => "ERR_INVALID_MODEL",
            ExErrorKind::BuildExecutionFailed => "ERR_BUILD_EXECUTION_FAILED",
            ExErrorKind::FileStoreCollision => "ERR_FILE_STORE_COLLISION",
            ExErrorKind::FileStoreMissing => "ERR_FILE_STORE_MISSING",
            ExErrorKind::Io => "ERR_IO",
            ExErrorKind::Serialization => "ERR_SERIALIZATION",
            ExErrorKind::Internal => "ERR_INTERNAL",
        }
    }

    /// True for kinds that indicate a registry or invocation misconfiguration
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            ExErrorKind::DuplicateOutcome
                | ExErrorKind::DuplicateRegistration
                | ExErrorKind::NoComparator
                | ExErrorKind::NoRenderer
                | ExErrorKind::NoOutcomeModel
                | ExErrorKind::InvalidVersion
                | ExErrorKind::InvalidConfig
        )
    }
}

/// Stage of a comparison run in which an error was raised
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Association,
    Comparison,
    Rendering,
}

impl Stage {
    pub fn as_str(&self) -> &'static str {
        match self {
            Stage::Association => "association",
            Stage::Comparison => "comparison",
            Stage::Rendering => "rendering",
        }
    }
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Canonical structured error type
///
/// Carries a classification for programmatic handling plus enough context
/// (stage, outcome kind and name, tool version) to name the offending entity.
#[derive(Debug, Clone)]
pub struct ExError {
    kind: ExErrorKind,
    op: Option<String>,
    stage: Option<Stage>,
    outcome_kind: Option<String>,
    outcome_name: Option<String>,
    version: Option<String>,
    run_id: Option<RunId>,
    message: String,
    source: Option<Box<ExError>>,
}

impl ExError {
    /// Create a new error with the specified kind
    pub fn new(kind: ExErrorKind) -> Self {
        Self {
            kind,
            op: None,
            stage: None,
            outcome_kind: None,
            outcome_name: None,
            version: None,
            run_id: None,
            message: String::new(),
            source: None,
        }
    }

    /// Add operation context
    pub fn with_op(mut self, op: impl Into<String>) -> Self {
        self.op = Some(op.into());
        self
    }

    /// Add run stage context
    pub fn with_stage(mut self, stage: Stage) -> Self {
        self.stage = Some(stage);
        self
    }

    /// Add stage context unless a stage is already recorded
    pub fn or_stage(mut self, stage: Stage) -> Self {
        self.stage.get_or_insert(stage);
        self
    }

    /// Add outcome kind context
    pub fn with_outcome_kind(mut self, kind: impl Into<String>) -> Self {
        self.outcome_kind = Some(kind.into());
        self
    }

    /// Add outcome name context
    pub fn with_outcome_name(mut self, name: impl Into<String>) -> Self {
        self.outcome_name = Some(name.into());
        self
    }

    /// Add tool version context
    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = Some(version.into());
        self
    }

    /// Add run ID context
    pub fn with_run_id(mut self, run_id: RunId) -> Self {
        self.run_id = Some(run_id);
        self
    }

    /// Add custom message
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    /// Add source error
    pub fn with_source(mut self, source: ExError) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    /// Get the error kind
    pub fn kind(&self) -> ExErrorKind {
        self.kind
    }

    /// Get the stable error code
    pub fn code(&self) -> &'static str {
        self.kind.code()
    }

    pub fn op(&self) -> Option<&str> {
        self.op.as_deref()
    }

    pub fn stage(&self) -> Option<Stage> {
        self.stage
    }

    pub fn outcome_kind(&self) -> Option<&str> {
        self.outcome_kind.as_deref()
    }

    pub fn outcome_name(&self) -> Option<&str> {
        self.outcome_name.as_deref()
    }

    pub fn version(&self) -> Option<&str> {
        self.version.as_deref()
    }

    pub fn run_id(&self) -> Option<&RunId> {
        self.run_id.as_ref()
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// Get the source error, if any
    pub fn source_error(&self) -> Option<&ExError> {
        self.source.as_deref()
    }
}

impl std::fmt::Display for ExError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}]", self.code())?;
        if let Some(stage) = &self.stage {
            write!(f, " during {}", stage)?;
        }
        if let Some(op) = &self.op {
            write!(f, " in operation '{}'", op)?;
        }
        if !self.message.is_empty() {
            write!(f, ": {}", self.message)?;
        }
        if let Some(kind) = &self.outcome_kind {
            write!(f, " (kind: {})", kind)?;
        }
        if let Some(name) = &self.outcome_name {
            write!(f, " (name: {})", name)?;
        }
        if let Some(version) = &self.version {
            write!(f, " (version: {})", version)?;
        }
        if let Some(source) = &self.source {
            write!(f, "; caused by {}", source)?;
        }
        Ok(())
    }
}

impl std::error::Error for ExError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_deref()
            .map(|e| e as &(dyn std::error::Error + 'static))
    }
}

// ========== End Error Facility ==========

/// Validation errors raised by the outcome model and the handler registries
#[derive(Error, Debug, Clone, PartialEq)]
pub enum BuildCompareError {
    /// Two outcomes in one set share kind and name
    #[error("Duplicate {kind} outcome '{name}' in the {side} outcome set")]
    DuplicateOutcome {
        side: String,
        kind: String,
        name: String,
    },

    /// More than one associator claims the same kind
    #[error("An associator is already registered for outcome kind {kind}")]
    DuplicateAssociator { kind: String },

    /// More than one comparator registered for the same kind
    #[error("A comparator is already registered for outcome kind {kind}")]
    DuplicateComparator { kind: String },

    /// More than one renderer registered for the same section
    #[error("A renderer is already registered for section {section}")]
    DuplicateRenderer { section: String },

    /// An associated pair has no comparator for its kind
    #[error("No comparator registered for outcome kind {kind} (outcome '{name}')")]
    NoComparator { kind: String, name: String },

    /// A result section has no renderer
    #[error("No renderer registered for section {section} (outcome '{name}')")]
    NoRenderer { section: String, name: String },

    /// A comparator was handed outcomes of a different kind
    #[error("Comparator for {expected} outcomes received a {actual} outcome '{name}'")]
    KindMismatch {
        expected: String,
        actual: String,
        name: String,
    },

    /// An archive listing names the same entry twice
    #[error("Archive '{name}' lists entry '{path}' more than once")]
    DuplicateArchiveEntry { name: String, path: String },

    /// The stored bytes of an archive could not be read as an archive
    #[error("Archive '{name}' could not be read: {reason}")]
    UnreadableArchive { name: String, reason: String },
}

/// Conversion from BuildCompareError to ExError
impl From<BuildCompareError> for ExError {
    fn from(err: BuildCompareError) -> Self {
        let message = err.to_string();
        match err {
            BuildCompareError::DuplicateOutcome { kind, name, .. } => {
                ExError::new(ExErrorKind::DuplicateOutcome)
                    .with_stage(Stage::Association)
                    .with_outcome_kind(kind)
                    .with_outcome_name(name)
                    .with_message(message)
            }
            BuildCompareError::DuplicateAssociator { kind } => {
                ExError::new(ExErrorKind::DuplicateRegistration)
                    .with_op("register_associator")
                    .with_outcome_kind(kind)
                    .with_message(message)
            }
            BuildCompareError::DuplicateComparator { kind } => {
                ExError::new(ExErrorKind::DuplicateRegistration)
                    .with_op("register_comparator")
                    .with_outcome_kind(kind)
                    .with_message(message)
            }
            BuildCompareError::DuplicateRenderer { section } => {
                ExError::new(ExErrorKind::DuplicateRegistration)
                    .with_op("register_renderer")
                    .with_outcome_kind(section)
                    .with_message(message)
            }
            BuildCompareError::NoComparator { kind, name } => {
                ExError::new(ExErrorKind::NoComparator)
                    .with_stage(Stage::Comparison)
                    .with_outcome_kind(kind)
                    .with_outcome_name(name)
                    .with_message(message)
            }
            BuildCompareError::NoRenderer { section, name } => {
                ExError::new(ExErrorKind::NoRenderer)
                    .with_stage(Stage::Rendering)
                    .with_outcome_kind(section)
                    .with_outcome_name(name)
                    .with_message(message)
            }
            BuildCompareError::KindMismatch {
                expected: _,
                actual,
                name,
            } => ExError::new(ExErrorKind::OutcomeKindMismatch)
                .with_stage(Stage::Comparison)
                .with_outcome_kind(actual)
                .with_outcome_name(name)
                .with_message(message),
            BuildCompareError::DuplicateArchiveEntry { name, .. }
            | BuildCompareError::UnreadableArchive { name, .. } => {
                ExError::new(ExErrorKind::ComparisonFailed)
                    .with_stage(Stage::Comparison)
                    .with_outcome_kind("archive")
                    .with_outcome_name(name)
                    .with_message(message)
            }
        }
    }
}

impl From<serde_json::Error> for ExError {
    fn from(err: serde_json::Error) -> Self {
        ExError::new(ExErrorKind::Serialization).with_message(err.to_string())
    }
}

//! The closed set of actions and the static facts attached to each.
//!
//! Every [`Action`] maps to exactly one [`ActionSpec`] through
//! [`Action::spec`]. The dispatcher matches on the enum to pick a handler, so
//! adding a variant without an `ActionSpec` or a handler is a compile error.

use std::fmt;
use std::str::FromStr;

use crate::config::CONFIG_FILE_NAME;
use crate::error::ToolError;

/// Entry-point HTML file expected at the root of both sync directories.
pub const SYNC_MARKER: &str = "index.html";
/// Entry-point module of a React project.
pub const PROJECT_ENTRY: &str = "index.tsx";
/// Backup written before `index.tsx` is replaced.
pub const PROJECT_ENTRY_BACKUP: &str = "index.org.tsx";
/// Template that replaces `index.tsx`, shipped next to the tool.
pub const PROJECT_ENTRY_TEMPLATE: &str = "index.deploy.template.tsx";
/// Vite configuration used for static hosting builds.
pub const HOSTING_CONFIG: &str = "vite.gh-pages.config.ts";
/// Vite configuration used for the embeddable bundle.
pub const BUNDLE_CONFIG: &str = "vite.react-angular.config.ts";
/// Example tool config shipped next to the tool.
pub const CONFIG_EXAMPLE: &str = "config-deploy-example.conf";

/// A requested unit of work.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    /// Copy the exported tree into the project, additively.
    Synchronize,
    /// Write the static-hosting Vite config.
    WriteHostingConfig,
    /// Write the embeddable-bundle Vite config.
    WriteBundleConfig,
    /// Build the project for static hosting.
    BuildForHosting,
    /// Publish the hosting build to its branch.
    PublishToHosting,
    /// Build the embeddable bundle.
    GenerateBundle,
    /// Replace `index.tsx` with the deploy template, keeping a backup.
    UpdateIndexTsx,
    /// Copy the example tool config into the project.
    GenerateConfig,
}

/// Something that must hold before an action runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Precondition {
    /// The marker must exist in both sync roots; the operator may continue
    /// past a missing one when prompting is allowed.
    SyncMarker(&'static str),
    /// The file must exist in the project directory. Always fatal.
    ProjectFile(&'static str),
    /// The template must exist in the tool directory.
    Template(&'static str),
    /// The destination must not exist unless `--overwrite` was given.
    FreshDestination(&'static str),
    /// A file produced by an earlier action must exist.
    Requires {
        /// File name relative to the project directory.
        file: &'static str,
        /// The action that produces it.
        produced_by: Action,
    },
    /// The operator must confirm (or pass `--overwrite`) before a change to
    /// the named project file.
    Confirm {
        /// File that will be changed.
        file: &'static str,
        /// Question shown to the operator.
        question: &'static str,
    },
}

/// Static description of an action.
#[derive(Debug)]
pub struct ActionSpec {
    /// One-line summary shown in menus and stage headers.
    pub description: &'static str,
    /// Checks run by the validator, in order.
    pub preconditions: &'static [Precondition],
    /// File the action writes, relative to the project directory.
    pub output: Option<&'static str>,
    /// External command the action runs, if any.
    pub command: Option<&'static [&'static str]>,
    /// Whether the action can replace an existing file.
    pub destructive: bool,
}

static SYNCHRONIZE: ActionSpec = ActionSpec {
    description: "Sync exported files into the project",
    preconditions: &[Precondition::SyncMarker(SYNC_MARKER)],
    output: None,
    command: None,
    destructive: true,
};

static WRITE_HOSTING_CONFIG: ActionSpec = ActionSpec {
    description: "Create the static hosting Vite config",
    preconditions: &[Precondition::FreshDestination(HOSTING_CONFIG)],
    output: Some(HOSTING_CONFIG),
    command: None,
    destructive: true,
};

static WRITE_BUNDLE_CONFIG: ActionSpec = ActionSpec {
    description: "Create the embeddable bundle Vite config",
    preconditions: &[Precondition::FreshDestination(BUNDLE_CONFIG)],
    output: Some(BUNDLE_CONFIG),
    command: None,
    destructive: true,
};

static BUILD_FOR_HOSTING: ActionSpec = ActionSpec {
    description: "Build the project for static hosting",
    preconditions: &[Precondition::Requires {
        file: HOSTING_CONFIG,
        produced_by: Action::WriteHostingConfig,
    }],
    output: None,
    command: Some(&["vite", "build", "--config", HOSTING_CONFIG]),
    destructive: false,
};

static PUBLISH_TO_HOSTING: ActionSpec = ActionSpec {
    description: "Publish the hosting build",
    preconditions: &[Precondition::Requires {
        file: HOSTING_CONFIG,
        produced_by: Action::WriteHostingConfig,
    }],
    output: None,
    command: Some(&["npm", "run", "build-gh-pages"]),
    destructive: false,
};

static GENERATE_BUNDLE: ActionSpec = ActionSpec {
    description: "Build the embeddable bundle",
    preconditions: &[Precondition::Requires {
        file: BUNDLE_CONFIG,
        produced_by: Action::WriteBundleConfig,
    }],
    output: None,
    command: Some(&["vite", "build", "--config", BUNDLE_CONFIG]),
    destructive: false,
};

static UPDATE_INDEX_TSX: ActionSpec = ActionSpec {
    description: "Replace index.tsx with the deploy template",
    preconditions: &[
        Precondition::ProjectFile(PROJECT_ENTRY),
        Precondition::Template(PROJECT_ENTRY_TEMPLATE),
        Precondition::Confirm {
            file: PROJECT_ENTRY,
            question: "This will replace index.tsx with the deploy template \
                       (a backup is kept as index.org.tsx). Continue?",
        },
    ],
    output: Some(PROJECT_ENTRY),
    command: None,
    destructive: true,
};

static GENERATE_CONFIG: ActionSpec = ActionSpec {
    description: "Create config-deploy.conf from the example",
    preconditions: &[
        Precondition::ProjectFile(PROJECT_ENTRY),
        Precondition::FreshDestination(CONFIG_FILE_NAME),
        Precondition::Template(CONFIG_EXAMPLE),
    ],
    output: Some(CONFIG_FILE_NAME),
    command: None,
    destructive: true,
};

impl Action {
    /// Every action, in menu order.
    pub const ALL: [Self; 8] = [
        Self::Synchronize,
        Self::WriteHostingConfig,
        Self::WriteBundleConfig,
        Self::BuildForHosting,
        Self::PublishToHosting,
        Self::GenerateBundle,
        Self::UpdateIndexTsx,
        Self::GenerateConfig,
    ];

    /// Canonical identifier accepted by `--action`.
    #[must_use]
    pub const fn identifier(self) -> &'static str {
        match self {
            Self::Synchronize => "synchronize",
            Self::WriteHostingConfig => "write-hosting-config",
            Self::WriteBundleConfig => "write-bundle-config",
            Self::BuildForHosting => "build-for-hosting",
            Self::PublishToHosting => "publish-to-hosting",
            Self::GenerateBundle => "generate-bundle",
            Self::UpdateIndexTsx => "update-index-tsx",
            Self::GenerateConfig => "generate-config",
        }
    }

    /// Older identifiers still accepted on the command line.
    #[must_use]
    pub const fn aliases(self) -> &'static [&'static str] {
        match self {
            Self::WriteHostingConfig => &["add-config-gh-pages"],
            Self::WriteBundleConfig => &["add-config-bundle"],
            Self::BuildForHosting => &["build-gh-pages"],
            Self::PublishToHosting => &["deploy-gh-pages"],
            Self::Synchronize
            | Self::GenerateBundle
            | Self::UpdateIndexTsx
            | Self::GenerateConfig => &[],
        }
    }

    /// All canonical identifiers, in menu order.
    #[must_use]
    pub fn identifiers() -> Vec<&'static str> {
        Self::ALL.iter().map(|a| a.identifier()).collect()
    }

    /// The static facts for this action.
    #[must_use]
    pub fn spec(self) -> &'static ActionSpec {
        match self {
            Self::Synchronize => &SYNCHRONIZE,
            Self::WriteHostingConfig => &WRITE_HOSTING_CONFIG,
            Self::WriteBundleConfig => &WRITE_BUNDLE_CONFIG,
            Self::BuildForHosting => &BUILD_FOR_HOSTING,
            Self::PublishToHosting => &PUBLISH_TO_HOSTING,
            Self::GenerateBundle => &GENERATE_BUNDLE,
            Self::UpdateIndexTsx => &UPDATE_INDEX_TSX,
            Self::GenerateConfig => &GENERATE_CONFIG,
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.identifier())
    }
}

impl FromStr for Action {
    type Err = ToolError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Self::ALL
            .into_iter()
            .find(|a| a.identifier() == wanted || a.aliases().contains(&wanted))
            .ok_or_else(|| ToolError::UnknownAction(wanted.to_string()))
    }
}

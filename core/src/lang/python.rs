use crate::config::Toolchain;
use crate::lang::{CommandLine, Language, LanguageAdapter};
use crate::workspace::Workspace;

#[derive(Debug, Clone, Default)]
pub struct PythonAdapter;

impl LanguageAdapter for PythonAdapter {
    fn language(&self) -> Language {
        Language::Python
    }

    fn source_filename(&self) -> &'static str {
        "main.py"
    }

    fn compile_command(&self, _: &Workspace, _: &Toolchain) -> Option<CommandLine> {
        None
    }

    fn run_command(&self, ws: &Workspace, toolchain: &Toolchain) -> CommandLine {
        CommandLine::new(&toolchain.python).arg(ws.file(self.source_filename()))
    }
}

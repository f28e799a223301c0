use crate::config::Toolchain;
use crate::lang::{CommandLine, Language, LanguageAdapter};
use crate::workspace::Workspace;

/// The public class must be named `Main`: `javac` requires the file name to
/// match it, and the workspace directory is the classpath.
#[derive(Debug, Clone, Default)]
pub struct JavaAdapter;

impl JavaAdapter {
    pub const MAIN_CLASS: &str = "Main";
}

impl LanguageAdapter for JavaAdapter {
    fn language(&self) -> Language {
        Language::Java
    }

    fn source_filename(&self) -> &'static str {
        "Main.java"
    }

    fn compile_command(&self, ws: &Workspace, toolchain: &Toolchain) -> Option<CommandLine> {
        let cmd = CommandLine::new(&toolchain.javac)
            .arg("-encoding")
            .arg("UTF-8")
            .arg("-d")
            .arg(ws.dir())
            .arg(ws.file(self.source_filename()));
        Some(cmd)
    }

    fn run_command(&self, ws: &Workspace, toolchain: &Toolchain) -> CommandLine {
        CommandLine::new(&toolchain.java)
            .arg("-cp")
            .arg(ws.dir())
            .arg(Self::MAIN_CLASS)
    }
}

#[cfg(test)]
mod test {
    use std::ffi::OsString;

    use super::*;

    #[test]
    fn commands_point_into_workspace() {
        let root = tempfile::tempdir().unwrap();
        let ws = Workspace::create(root.path()).unwrap();
        let tc = Toolchain::default();

        let compile = JavaAdapter.compile_command(&ws, &tc).unwrap();
        assert_eq!(compile.program, std::path::Path::new("javac"));
        let want: Vec<OsString> = vec![
            "-encoding".into(),
            "UTF-8".into(),
            "-d".into(),
            ws.dir().into(),
            ws.file("Main.java").into(),
        ];
        assert_eq!(compile.args, want);

        let run = JavaAdapter.run_command(&ws, &tc);
        assert_eq!(run.program, std::path::Path::new("java"));
        let want: Vec<OsString> = vec!["-cp".into(), ws.dir().into(), "Main".into()];
        assert_eq!(run.args, want);
    }

    #[test]
    fn source_is_written_as_main_java_verbatim() {
        let root = tempfile::tempdir().unwrap();
        let ws = Workspace::create(root.path()).unwrap();
        let code = "public class Main { public static void main(String[] a) {} }\n";

        let path = JavaAdapter.materialize(&ws, code).unwrap();
        assert_eq!(path, ws.file("Main.java"));
        assert_eq!(fsutil::read_to_string(&path).unwrap(), code);
    }
}

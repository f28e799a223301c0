use std::borrow::Cow;

use lazy_regex::{lazy_regex, Lazy, Regex};

use crate::config::Toolchain;
use crate::lang::{CommandLine, Language, LanguageAdapter};
use crate::workspace::Workspace;

#[derive(Debug, Clone, Default)]
pub struct CppAdapter;

// Not every toolchain ships <bits/stdc++.h> (e.g. clang on macOS).
// Only the directive is replaced; a trailing comment or `\r` stays in place.
static RE_INCLUDE_BITS_STDCPP: Lazy<Regex> =
    lazy_regex!(r#"(?m)^[ \t]*#[ \t]*include[ \t]*<bits/stdc\+\+\.h>"#);

const BITS_STDCPP_REPLACEMENT: &str = "\
#include <algorithm>
#include <cmath>
#include <cstdio>
#include <cstring>
#include <iostream>
#include <map>
#include <numeric>
#include <queue>
#include <set>
#include <stack>
#include <string>
#include <vector>";

impl CppAdapter {
    const EXECUTABLE_NAME: &str = "main";
}

impl LanguageAdapter for CppAdapter {
    fn language(&self) -> Language {
        Language::Cpp
    }

    fn source_filename(&self) -> &'static str {
        "main.cpp"
    }

    fn preprocess<'c>(&self, code: &'c str) -> Cow<'c, str> {
        RE_INCLUDE_BITS_STDCPP.replace_all(code, BITS_STDCPP_REPLACEMENT)
    }

    fn compile_command(&self, ws: &Workspace, toolchain: &Toolchain) -> Option<CommandLine> {
        let cmd = CommandLine::new(&toolchain.cxx)
            .arg(format!("-std={}", toolchain.cxx_std))
            .arg("-O2")
            .arg("-o")
            .arg(ws.file(Self::EXECUTABLE_NAME))
            .arg(ws.file(self.source_filename()));
        Some(cmd)
    }

    fn run_command(&self, ws: &Workspace, _: &Toolchain) -> CommandLine {
        CommandLine::new(ws.file(Self::EXECUTABLE_NAME))
    }
}

use anyhow::Context as _;
use autoreg_codegen::{Config, Generator};
use std::{
    env, fs,
    path::{Path, PathBuf},
};

fn main() -> anyhow::Result<()> {
    let src = Path::new(env!("CARGO_MANIFEST_DIR")).join("src");
    println!("cargo:rerun-if-changed={}", src.display());

    let mut files = Vec::new();
    collect_rust_files(&src, &mut files)?;
    // Document order decides registration order, so it mustn't depend on the file system
    files.sort();

    let mut sources = Vec::with_capacity(files.len());
    for file in &files {
        let text = fs::read_to_string(file).with_context(|| format!("Failed to read {}", file.display()))?;
        sources.push((module_path(&src, file), text));
    }

    let generator = Generator::new(Config::default())?;
    let source = generator.generate_from_sources(sources.iter().map(|(module, text)| (module.as_str(), text.as_str())));

    let out = PathBuf::from(env::var("OUT_DIR")?).join(&source.file_name);
    fs::write(&out, source.text).with_context(|| format!("Failed to write {}", out.display()))?;

    Ok(())
}

fn collect_rust_files(dir: &Path, files: &mut Vec<PathBuf>) -> anyhow::Result<()> {
    for entry in fs::read_dir(dir).with_context(|| format!("Failed to read {}", dir.display()))? {
        let path = entry?.path();
        if path.is_dir() {
            collect_rust_files(&path, files)?;
        } else if path.extension().is_some_and(|extension| extension == "rs") {
            files.push(path);
        }
    }
    Ok(())
}

/// `src/main.rs` → ``, `src/services.rs` → `services`, `src/a/b/mod.rs` → `a::b`
fn module_path(src: &Path, file: &Path) -> String {
    let relative = file.strip_prefix(src).unwrap_or(file).with_extension("");
    let mut segments = relative
        .components()
        .map(|component| component.as_os_str().to_string_lossy().into_owned())
        .collect::<Vec<_>>();

    if matches!(segments.as_slice(), [root] if root == "main" || root == "lib") {
        segments.clear();
    }
    if segments.last().is_some_and(|last| last == "mod") {
        segments.pop();
    }

    segments.join("::")
}

//! Sources of script text. The session pulls one chunk at a time until a
//! source reports end of input.
use crate::config::Settings;
use crate::history::history_file;
use crate::options::Options;
use anyhow::{Context, Result};
use log::{debug, warn};
use rustyline::error::ReadlineError;
use rustyline::Editor;
use std::collections::VecDeque;
use std::fs::File;
use std::io::{BufRead, BufReader, IsTerminal, Lines};
use std::path::{Path, PathBuf};


pub trait Source {
    /// The next chunk of script text, or `None` at end of input.
    fn next_chunk(&mut self) -> Result<Option<String>>;

    /// Interactive sessions report faults and keep going. Batch sessions stop
    /// at the first fault.
    fn interactive(&self) -> bool {
        false
    }
}

/// Picks the source the way the command line asks for it.
///
/// * `-f`, or a single argument naming an existing file (without `-c`):
///   read those files.
/// * `-c` or any arguments: the arguments are the script.
/// * stdin is a terminal: line editor.
/// * otherwise: stdin, line by line.
pub fn select_source(options: &Options, settings: &Settings) -> Result<Box<dyn Source>> {
    let args = &options.script;
    if options.file || (!options.command && args.len() == 1 && Path::new(&args[0]).exists()) {
        debug!("reading script files {:?}", args);
        Ok(Box::new(FileSource::new(args.iter().map(PathBuf::from))))
    } else if options.command || !args.is_empty() {
        Ok(Box::new(ScriptSource::new(args.join(" "))))
    } else if std::io::stdin().is_terminal() {
        let history = if options.no_history || !settings.history() {
            None
        } else {
            match history_file(settings.history_file.as_deref()) {
                Ok(path) => Some(path),
                Err(e) => {
                    warn!("history disabled: {:#}", e);
                    None
                }
            }
        };
        Ok(Box::new(EditorSource::new(settings.prompt(), history)?))
    } else {
        debug!("reading script lines from stdin");
        Ok(Box::new(LineSource::new(std::io::stdin().lock())))
    }
}

/// A script given as a single string.
pub struct ScriptSource {
    script: Option<String>,
}

impl ScriptSource {
    pub fn new(script: String) -> Self {
        Self {
            script: Some(script),
        }
    }
}

impl Source for ScriptSource {
    fn next_chunk(&mut self) -> Result<Option<String>> {
        Ok(self.script.take().filter(|s| !s.is_empty()))
    }
}

/// The lines of several files, in order. Files are opened as they are
/// reached.
pub struct FileSource {
    pending: VecDeque<PathBuf>,
    current: Option<Lines<BufReader<File>>>,
}

impl FileSource {
    pub fn new(paths: impl IntoIterator<Item = PathBuf>) -> Self {
        Self {
            pending: paths.into_iter().collect(),
            current: None,
        }
    }
}

impl Source for FileSource {
    fn next_chunk(&mut self) -> Result<Option<String>> {
        loop {
            if let Some(lines) = self.current.as_mut() {
                match lines.next() {
                    Some(line) => return Ok(Some(line.context("failed to read script file")?)),
                    None => self.current = None,
                }
            }
            let path = match self.pending.pop_front() {
                Some(path) => path,
                None => return Ok(None),
            };
            debug!("opening {}", path.display());
            let file =
                File::open(&path).with_context(|| format!("failed to open {}", path.display()))?;
            self.current = Some(BufReader::new(file).lines());
        }
    }
}

/// Lines of any buffered reader, normally stdin.
pub struct LineSource<R: BufRead> {
    lines: Lines<R>,
}

impl<R: BufRead> LineSource<R> {
    pub fn new(reader: R) -> Self {
        Self {
            lines: reader.lines(),
        }
    }
}

impl<R: BufRead> Source for LineSource<R> {
    fn next_chunk(&mut self) -> Result<Option<String>> {
        self.lines.next().transpose().context("failed to read input")
    }
}

/// Interactive line editor with optional persistent history.
///
/// Ctrl-C abandons the current line; Ctrl-D ends input.
pub struct EditorSource {
    editor: Editor<()>,
    prompt: String,
    history: Option<PathBuf>,
}

impl EditorSource {
    pub fn new(prompt: &str, history: Option<PathBuf>) -> Result<Self> {
        let mut editor = Editor::<()>::new()?;
        if let Some(path) = &history {
            if let Err(e) = editor.load_history(path) {
                debug!("no history loaded from {}: {}", path.display(), e);
            }
        }
        Ok(Self {
            editor,
            prompt: prompt.to_string(),
            history,
        })
    }
}

impl Source for EditorSource {
    fn next_chunk(&mut self) -> Result<Option<String>> {
        match self.editor.readline(&self.prompt) {
            Ok(line) => {
                if !line.trim().is_empty() {
                    self.editor.add_history_entry(line.as_str());
                }
                Ok(Some(line))
            }
            Err(ReadlineError::Interrupted) => Ok(Some(String::new())),
            Err(ReadlineError::Eof) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn interactive(&self) -> bool {
        true
    }
}

impl Drop for EditorSource {
    fn drop(&mut self) {
        if let Some(path) = &self.history {
            if let Err(e) = self.editor.save_history(path) {
                warn!("failed to save history to {}: {}", path.display(), e);
            }
        }
    }
}

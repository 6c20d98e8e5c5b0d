use anyhow::{anyhow, Result};
use std::io::Write;
use std::sync::{Arc, Mutex};

pub mod balance_view;
pub mod format;
pub mod perp_view;
pub mod session_view;
pub mod swap_view;
pub mod token_view;

/// Line-oriented output shared by the console views
#[derive(Clone)]
pub struct Console {
    out: Arc<Mutex<Box<dyn Write + Send>>>,
}

impl Console {
    pub fn new(out: Box<dyn Write + Send>) -> Self {
        Self {
            out: Arc::new(Mutex::new(out)),
        }
    }

    pub fn stdout() -> Self {
        Self::new(Box::new(std::io::stdout()))
    }

    pub fn print(&self, text: &str) -> Result<()> {
        let mut out = self.out.lock().map_err(|_| anyhow!("console output poisoned"))?;
        writeln!(out, "{}", text)?;
        out.flush()?;
        Ok(())
    }
}

/// In-memory sink for view tests
#[cfg(test)]
#[derive(Clone, Default)]
pub struct CapturedOutput(Arc<Mutex<Vec<u8>>>);

#[cfg(test)]
impl CapturedOutput {
    pub fn console(&self) -> Console {
        Console::new(Box::new(self.clone()))
    }

    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
    }
}

#[cfg(test)]
impl Write for CapturedOutput {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

use std::io;
use std::sync::Arc;
use std::sync::Mutex;

use tracing::subscriber::DefaultGuard;
use tracing_subscriber::fmt::MakeWriter;

/// Collects formatted log lines written while the guard returned by
/// [`CapturedLogs::install`] is alive on the current thread.
#[derive(Clone, Default)]
pub struct CapturedLogs {
    buffer: Arc<Mutex<Vec<u8>>>,
}

impl CapturedLogs {
    pub fn install() -> (CapturedLogs, DefaultGuard) {
        let logs = CapturedLogs::default();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(logs.clone())
            .with_ansi(false)
            .finish();
        let guard = tracing::subscriber::set_default(subscriber);

        return (logs, guard);
    }

    pub fn contents(&self) -> String {
        return String::from_utf8_lossy(&self.buffer.lock().unwrap()).to_string();
    }
}

impl io::Write for CapturedLogs {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.buffer.lock().unwrap().extend_from_slice(buf);
        return Ok(buf.len());
    }

    fn flush(&mut self) -> io::Result<()> {
        return Ok(());
    }
}

impl<'a> MakeWriter<'a> for CapturedLogs {
    type Writer = CapturedLogs;

    fn make_writer(&'a self) -> Self::Writer {
        return self.clone();
    }
}

/// Two vacancies as returned by the hh.ru search endpoint. The first one has a
/// complete salary, the second one has none.
pub fn vacancies_fixture() -> &'static str {
    return r#"
{
  "found": 2,
  "pages": 1,
  "page": 0,
  "per_page": 5,
  "items": [
    {
      "id": "93012345",
      "name": "Rust developer",
      "employer": { "id": "1740", "name": "Yandex" },
      "salary": { "from": 250000, "to": 350000, "currency": "RUR", "gross": false },
      "alternate_url": "https://hh.ru/vacancy/93012345"
    },
    {
      "id": "93054321",
      "name": "Backend engineer (Rust)",
      "employer": { "id": "3529", "name": "Sber" },
      "salary": null,
      "alternate_url": "https://hh.ru/vacancy/93054321"
    }
  ]
}
"#
    .trim();
}

/// Three updates from Telegram's getUpdates. The middle one is a sticker and
/// carries no text.
pub fn updates_fixture() -> &'static str {
    return r#"
{
  "ok": true,
  "result": [
    {
      "update_id": 100,
      "message": {
        "message_id": 1,
        "date": 1700000000,
        "chat": { "id": 42, "type": "private" },
        "text": "/job_selection"
      }
    },
    {
      "update_id": 101,
      "message": {
        "message_id": 2,
        "date": 1700000001,
        "chat": { "id": 42, "type": "private" },
        "sticker": { "file_id": "abc" }
      }
    },
    {
      "update_id": 102,
      "message": {
        "message_id": 3,
        "date": 1700000002,
        "chat": { "id": 7, "type": "private" },
        "text": "Rust developer"
      }
    }
  ]
}
"#
    .trim();
}

// Flat-file roster: fixed header with metadata, then appended person records.
use std::fs::OpenOptions;
use std::io::{Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};

use fs2::FileExt;
use serde::Serialize;
use tracing::debug;

use crate::core::error::{Error, ErrorKind};

const MAGIC: [u8; 4] = *b"RSTR";
const VERSION: u32 = 1;
const HEADER_LEN: usize = 24;
const MAX_NAME_LEN: usize = 64 * 1024;

/// Roster-wide metadata persisted in the file header. `next_id` is the value
/// assigned to the next inserted person; ids are never reused.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct RosterMeta {
    pub next_id: u64,
    pub count: u64,
}

#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct Person {
    pub id: u64,
    pub age: i32,
    pub name: String,
}

/// Open handle to a roster file. Holds an advisory exclusive lock for its
/// lifetime; the lock is released when the handle is dropped.
#[derive(Debug)]
pub struct Roster {
    file: std::fs::File,
    path: PathBuf,
    meta: RosterMeta,
}

impl Roster {
    /// Opens `path`, creating and initializing it when missing. Fails with
    /// `Busy` when another process holds the lock.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, Error> {
        let path = path.as_ref().to_path_buf();
        let file = OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(false)
            .open(&path)
            .map_err(|err| {
                Error::new(ErrorKind::Io)
                    .with_message("failed to open roster file")
                    .with_path(&path)
                    .with_source(err)
            })?;

        file.try_lock_exclusive().map_err(|err| {
            let kind = if err.kind() == fs2::lock_contended_error().kind() {
                ErrorKind::Busy
            } else {
                ErrorKind::Io
            };
            Error::new(kind)
                .with_message("failed to lock roster file")
                .with_path(&path)
                .with_source(err)
        })?;

        let mut roster = Self {
            file,
            path,
            meta: RosterMeta::default(),
        };

        let len = roster.file_len()?;
        if len == 0 {
            roster.write_header()?;
            debug!(path = %roster.path.display(), "initialized new roster");
        } else {
            roster.meta = roster.read_header()?;
            debug!(
                path = %roster.path.display(),
                count = roster.meta.count,
                "opened roster"
            );
        }

        Ok(roster)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn meta(&self) -> RosterMeta {
        self.meta
    }

    /// Inserts a person, assigning the next id. The header is rewritten
    /// before the record is appended, matching the recovery expectation that
    /// the metadata never undercounts ids already handed out.
    pub fn insert(&mut self, name: &str, age: i32) -> Result<Person, Error> {
        if name.is_empty() {
            return Err(Error::new(ErrorKind::Usage).with_message("name must not be empty"));
        }
        if name.len() > MAX_NAME_LEN {
            return Err(Error::new(ErrorKind::Usage).with_message("name is too long"));
        }

        let person = Person {
            id: self.meta.next_id,
            age,
            name: name.to_string(),
        };

        self.meta.next_id += 1;
        self.meta.count += 1;
        self.write_header()?;

        self.seek(SeekFrom::End(0))?;
        self.write_record(&person)?;
        self.flush()?;

        debug!(id = person.id, "inserted person");
        Ok(person)
    }

    /// Reads every record in file order.
    pub fn people(&mut self) -> Result<Vec<Person>, Error> {
        self.seek(SeekFrom::Start(HEADER_LEN as u64))?;
        let mut people = Vec::new();
        while let Some(person) = self.read_record()? {
            people.push(person);
        }
        Ok(people)
    }

    /// First person whose name matches exactly.
    pub fn find(&mut self, name: &str) -> Result<Option<Person>, Error> {
        self.seek(SeekFrom::Start(HEADER_LEN as u64))?;
        while let Some(person) = self.read_record()? {
            if person.name == name {
                return Ok(Some(person));
            }
        }
        Ok(None)
    }

    /// Truncates the file and rewrites it from the given metadata and
    /// records. Used by import; record ids are taken as-is.
    pub fn replace_all(&mut self, meta: RosterMeta, people: &[Person]) -> Result<(), Error> {
        self.file.set_len(0).map_err(|err| self.io_error(err, "failed to truncate roster"))?;
        self.meta = meta;
        self.write_header()?;
        self.seek(SeekFrom::End(0))?;
        for person in people {
            self.write_record(person)?;
        }
        self.flush()?;
        debug!(count = people.len(), "replaced roster contents");
        Ok(())
    }

    fn write_header(&mut self) -> Result<(), Error> {
        let mut buf = [0u8; HEADER_LEN];
        buf[0..4].copy_from_slice(&MAGIC);
        buf[4..8].copy_from_slice(&VERSION.to_le_bytes());
        buf[8..16].copy_from_slice(&self.meta.next_id.to_le_bytes());
        buf[16..24].copy_from_slice(&self.meta.count.to_le_bytes());
        self.seek(SeekFrom::Start(0))?;
        self.file
            .write_all(&buf)
            .map_err(|err| self.io_error(err, "failed to write roster header"))
    }

    fn read_header(&mut self) -> Result<RosterMeta, Error> {
        let mut buf = [0u8; HEADER_LEN];
        self.seek(SeekFrom::Start(0))?;
        self.file
            .read_exact(&mut buf)
            .map_err(|err| self.corrupt("roster header too small").with_source(err))?;
        if buf[0..4] != MAGIC {
            return Err(self.corrupt("bad roster magic"));
        }
        let version = u32::from_le_bytes(read_4(&buf, 4));
        if version != VERSION {
            return Err(self.corrupt("unsupported roster version"));
        }
        Ok(RosterMeta {
            next_id: u64::from_le_bytes(read_8(&buf, 8)),
            count: u64::from_le_bytes(read_8(&buf, 16)),
        })
    }

    fn write_record(&mut self, person: &Person) -> Result<(), Error> {
        let name = person.name.as_bytes();
        let mut buf = Vec::with_capacity(16 + name.len());
        buf.extend_from_slice(&person.id.to_le_bytes());
        buf.extend_from_slice(&person.age.to_le_bytes());
        buf.extend_from_slice(&(name.len() as u32).to_le_bytes());
        buf.extend_from_slice(name);
        self.file
            .write_all(&buf)
            .map_err(|err| self.io_error(err, "failed to write person record"))
    }

    /// Reads one record at the current position; `None` at clean end-of-file.
    fn read_record(&mut self) -> Result<Option<Person>, Error> {
        let mut fixed = [0u8; 16];
        if !self.read_exact_or_eof(&mut fixed)? {
            return Ok(None);
        }
        let id = u64::from_le_bytes(read_8(&fixed, 0));
        let age = i32::from_le_bytes(read_4(&fixed, 8));
        let name_len = u32::from_le_bytes(read_4(&fixed, 12)) as usize;
        if name_len > MAX_NAME_LEN {
            return Err(self.corrupt("person name length is implausible"));
        }
        let mut name = vec![0u8; name_len];
        self.file
            .read_exact(&mut name)
            .map_err(|err| self.corrupt("truncated person record").with_source(err))?;
        let name = String::from_utf8(name)
            .map_err(|err| self.corrupt("person name is not valid utf-8").with_source(err))?;
        Ok(Some(Person { id, age, name }))
    }

    fn read_exact_or_eof(&mut self, buf: &mut [u8]) -> Result<bool, Error> {
        let mut filled = 0;
        while filled < buf.len() {
            let read = self
                .file
                .read(&mut buf[filled..])
                .map_err(|err| self.io_error(err, "failed to read roster"))?;
            if read == 0 {
                if filled == 0 {
                    return Ok(false);
                }
                return Err(self.corrupt("truncated person record"));
            }
            filled += read;
        }
        Ok(true)
    }

    fn seek(&mut self, from: SeekFrom) -> Result<u64, Error> {
        self.file
            .seek(from)
            .map_err(|err| self.io_error(err, "failed to seek roster"))
    }

    fn flush(&mut self) -> Result<(), Error> {
        self.file
            .flush()
            .map_err(|err| self.io_error(err, "failed to flush roster"))
    }

    fn file_len(&self) -> Result<u64, Error> {
        let meta = self
            .file
            .metadata()
            .map_err(|err| self.io_error(err, "failed to stat roster"))?;
        Ok(meta.len())
    }

    fn io_error(&self, err: std::io::Error, message: &str) -> Error {
        Error::new(ErrorKind::Io)
            .with_message(message)
            .with_path(&self.path)
            .with_source(err)
    }

    fn corrupt(&self, message: &str) -> Error {
        Error::new(ErrorKind::Corrupt)
            .with_message(message)
            .with_path(&self.path)
    }
}

fn read_4(buf: &[u8], offset: usize) -> [u8; 4] {
    let mut out = [0u8; 4];
    out.copy_from_slice(&buf[offset..offset + 4]);
    out
}

fn read_8(buf: &[u8], offset: usize) -> [u8; 8] {
    let mut out = [0u8; 8];
    out.copy_from_slice(&buf[offset..offset + 8]);
    out
}

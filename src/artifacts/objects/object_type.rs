use std::io::BufRead;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ObjectType {
    Blob,
    Commit,
}

/// Marker every serialized commit starts with
const COMMIT_HEADER_PREFIX: &[u8] = b"commit ";

impl ObjectType {
    pub fn as_str(&self) -> &str {
        match self {
            ObjectType::Blob => "blob",
            ObjectType::Commit => "commit",
        }
    }

    /// Classify stored bytes
    ///
    /// Commits carry a `commit <size>\0` header whose size matches the body.
    /// Anything else is blob content.
    pub fn detect(content: &[u8]) -> ObjectType {
        if Self::commit_body_offset(content).is_some() {
            ObjectType::Commit
        } else {
            ObjectType::Blob
        }
    }

    /// Consume a `commit <size>\0` header, returning the declared body size
    pub fn parse_commit_header(data_reader: &mut impl BufRead) -> anyhow::Result<usize> {
        let mut object_type = Vec::new();
        data_reader.read_until(b' ', &mut object_type)?;

        let object_type = String::from_utf8(object_type)?;
        if ObjectType::try_from(object_type.trim())? != ObjectType::Commit {
            anyhow::bail!("Object is not a commit");
        }

        let mut size = Vec::new();
        data_reader.read_until(b'\0', &mut size)?;
        if size.pop() != Some(b'\0') {
            anyhow::bail!("Unterminated object header");
        }

        Ok(String::from_utf8(size)?.parse::<usize>()?)
    }

    fn commit_body_offset(content: &[u8]) -> Option<usize> {
        let rest = content.strip_prefix(COMMIT_HEADER_PREFIX)?;
        let nul = rest.iter().position(|byte| *byte == b'\0')?;
        let size = std::str::from_utf8(&rest[..nul]).ok()?.parse::<usize>().ok()?;
        let offset = COMMIT_HEADER_PREFIX.len() + nul + 1;

        (content.len() - offset == size).then_some(offset)
    }
}

impl TryFrom<&str> for ObjectType {
    type Error = anyhow::Error;

    fn try_from(value: &str) -> anyhow::Result<Self> {
        match value {
            "blob" => Ok(ObjectType::Blob),
            "commit" => Ok(ObjectType::Commit),
            _ => Err(anyhow::anyhow!("Invalid object type")),
        }
    }
}

impl std::fmt::Display for ObjectType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

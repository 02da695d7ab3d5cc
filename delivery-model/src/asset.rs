use crate::FieldsDecoder;
use delivery_types::{DecodeResult, FileMetadata, Resource, Sys};

/// A media asset: metadata plus the location of its binary.
#[derive(Debug, Clone, PartialEq)]
pub struct Asset {
    sys: Sys,
    pub title: Option<String>,
    pub description: Option<String>,
    pub file: Option<FileMetadata>,
}

impl Asset {
    /// Decodes an asset from its sys block and fields. Every asset field is
    /// optional.
    pub fn decode(sys: Sys, fields: &FieldsDecoder<'_>) -> DecodeResult<Self> {
        Ok(Self {
            title: fields.decode_optional("title")?,
            description: fields.decode_optional("description")?,
            file: fields.decode_optional("file")?,
            sys,
        })
    }

    /// Absolute URL of the asset's file; `None` without a file or while the
    /// upload is still being processed.
    pub fn url(&self) -> Option<String> {
        self.file.as_ref().and_then(FileMetadata::absolute_url)
    }
}

impl Resource for Asset {
    fn sys(&self) -> &Sys {
        &self.sys
    }
}

// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! ISO 10303-21 file framing: header section and trailer.

use time::macros::format_description;
use time::OffsetDateTime;

use crate::attribute::write_text;

/// Schema written to `FILE_SCHEMA`
pub const SCHEMA_IDENTIFIER: &str = "IFC4";

/// Header section contents
#[derive(Debug, Clone)]
pub struct FileHeader {
    pub description: String,
    pub implementation_level: String,
    pub name: String,
    /// ISO 8601 timestamp; `None` stamps the time of serialization
    pub time_stamp: Option<String>,
    pub author: String,
    pub organization: String,
    pub preprocessor_version: String,
    pub originating_system: String,
    pub authorization: String,
}

impl FileHeader {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            description: "ViewDefinition [ReferenceView]".to_string(),
            implementation_level: "2;1".to_string(),
            name: name.into(),
            time_stamp: None,
            author: String::new(),
            organization: String::new(),
            preprocessor_version: concat!("ifc-export ", env!("CARGO_PKG_VERSION")).to_string(),
            originating_system: "ifc-export".to_string(),
            authorization: String::new(),
        }
    }

    pub fn with_timestamp(mut self, time_stamp: impl Into<String>) -> Self {
        self.time_stamp = Some(time_stamp.into());
        self
    }

    /// `ISO-10303-21;`, the `HEADER` section and `DATA;`
    pub fn write_preamble(&self, out: &mut String) {
        let time_stamp = self
            .time_stamp
            .clone()
            .unwrap_or_else(|| format_timestamp(OffsetDateTime::now_utc()));

        out.push_str("ISO-10303-21;\nHEADER;\n");

        out.push_str("FILE_DESCRIPTION((");
        write_text(&self.description, out);
        out.push_str("), ");
        write_text(&self.implementation_level, out);
        out.push_str(");\n");

        out.push_str("FILE_NAME(");
        write_text(&self.name, out);
        out.push_str(", ");
        write_text(&time_stamp, out);
        out.push_str(", (");
        write_text(&self.author, out);
        out.push_str("), (");
        write_text(&self.organization, out);
        out.push_str("), ");
        write_text(&self.preprocessor_version, out);
        out.push_str(", ");
        write_text(&self.originating_system, out);
        out.push_str(", ");
        write_text(&self.authorization, out);
        out.push_str(");\n");

        out.push_str("FILE_SCHEMA((");
        write_text(SCHEMA_IDENTIFIER, out);
        out.push_str("));\nENDSEC;\nDATA;\n");
    }

    /// `ENDSEC;` of the data section and the file terminator
    pub fn write_trailer(out: &mut String) {
        out.push_str("ENDSEC;\nEND-ISO-10303-21;\n");
    }
}

/// `YYYY-MM-DDThh:mm:ss` in the offset of `time`; callers pass UTC
pub fn format_timestamp(time: OffsetDateTime) -> String {
    let format = format_description!("[year]-[month]-[day]T[hour]:[minute]:[second]");
    // every component is present on an OffsetDateTime, formatting into a String cannot fail
    time.format(format).unwrap_or_default()
}

// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

/// Tabular file formats accepted for upload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TabularFormat {
    /// Office Open XML workbook.
    Xlsx,
    /// Legacy binary Excel workbook.
    Xls,
    /// Comma separated values.
    Csv,
    /// Tab separated values.
    Tsv,
}

impl TabularFormat {
    /// All formats in the order they are offered to users.
    pub const ALL: [Self; 4] = [Self::Xlsx, Self::Xls, Self::Csv, Self::Tsv];

    /// Detects the format from a file name extension, ignoring case.
    ///
    /// Returns `None` for any other extension or a name without one.
    #[must_use]
    pub fn from_file_name(file_name: &str) -> Option<Self> {
        let (_, extension) = file_name.rsplit_once('.')?;
        Self::ALL
            .into_iter()
            .find(|format| extension.eq_ignore_ascii_case(format.extension()))
    }

    /// Field delimiter byte for the csv reader. Workbooks have none.
    #[must_use]
    pub const fn delimiter(self) -> Option<u8> {
        match self {
            Self::Csv => Some(b','),
            Self::Tsv => Some(b'\t'),
            Self::Xlsx | Self::Xls => None,
        }
    }

    #[must_use]
    pub const fn extension(self) -> &'static str {
        match self {
            Self::Xlsx => "xlsx",
            Self::Xls => "xls",
            Self::Csv => "csv",
            Self::Tsv => "tsv",
        }
    }
}

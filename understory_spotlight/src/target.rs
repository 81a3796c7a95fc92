// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Target references and their resolution to concrete elements.
//!
//! Each [`TargetRef`] variant knows how to find the element to highlight and
//! which accent color to use by default for the tint and dim layer.

use alloc::vec::Vec;
use core::fmt;

use peniko::Color;

use crate::host::ElementHost;

/// Something to highlight.
#[derive(Clone, Debug, PartialEq)]
pub enum TargetRef<E> {
    /// Any element; accent is its tint color.
    Element(E),
    /// A text label; accent is its text color.
    Label(E),
    /// A button; accent is its normal-state title color.
    Button(E),
    /// The `index`-th interactive item of a tab bar, counted left to right;
    /// accent is the tab bar's tint.
    TabBarItem {
        /// The tab bar.
        tab_bar: E,
        /// Item index.
        index: usize,
    },
    /// Content of a table cell. Rows get no holder around them.
    TableCell {
        /// The table.
        table: E,
        /// Section index.
        section: usize,
        /// Row index within the section.
        row: usize,
    },
    /// A bar button item; highlights the first child of its backing element.
    BarButtonItem(E),
}

/// A target resolved to the element that will be highlighted.
#[derive(Clone, Debug, PartialEq)]
pub struct ResolvedTarget<E> {
    /// Element to measure and snapshot.
    pub element: E,
    /// Default tint and dim color, when the variant provides one.
    pub accent: Option<Color>,
    /// Holder radius forced by the variant.
    pub holder_radius: Option<f64>,
}

impl<E> ResolvedTarget<E> {
    fn new(element: E, accent: Option<Color>) -> Self {
        Self {
            element,
            accent,
            holder_radius: None,
        }
    }
}

/// Why a [`TargetRef`] could not be resolved.
///
/// These are caller bugs or timing issues; the showcase ignores them rather
/// than failing.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TargetError {
    /// The tab bar has fewer interactive items than requested.
    TabIndexOutOfRange {
        /// Requested index.
        index: usize,
        /// Number of interactive items found.
        count: usize,
    },
    /// The table has no loaded cell at that position.
    MissingCell {
        /// Section index.
        section: usize,
        /// Row index.
        row: usize,
    },
    /// The bar button item has no realized element with children.
    UnrealizedBarItem,
}

impl fmt::Display for TargetError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TabIndexOutOfRange { index, count } => write!(
                f,
                "tab bar item index {index} is out of range ({count} items)"
            ),
            Self::MissingCell { section, row } => {
                write!(f, "no loaded table cell at section {section}, row {row}")
            }
            Self::UnrealizedBarItem => f.write_str("bar button item has no backing element"),
        }
    }
}

impl core::error::Error for TargetError {}

/// Resolves `target` against the host's element tree.
pub fn resolve<H: ElementHost + ?Sized>(
    host: &H,
    target: &TargetRef<H::Element>,
) -> Result<ResolvedTarget<H::Element>, TargetError> {
    match target {
        TargetRef::Element(e) => Ok(ResolvedTarget::new(e.clone(), host.tint_color(e))),
        TargetRef::Label(e) => Ok(ResolvedTarget::new(
            e.clone(),
            host.text_color(e).or_else(|| host.tint_color(e)),
        )),
        TargetRef::Button(e) => Ok(ResolvedTarget::new(
            e.clone(),
            host.title_color(e).or_else(|| host.tint_color(e)),
        )),
        TargetRef::TabBarItem { tab_bar, index } => {
            let items = ordered_tab_items(host, tab_bar);
            let count = items.len();
            let item = items
                .into_iter()
                .nth(*index)
                .ok_or(TargetError::TabIndexOutOfRange {
                    index: *index,
                    count,
                })?;
            Ok(ResolvedTarget::new(item, host.tint_color(tab_bar)))
        }
        TargetRef::TableCell {
            table,
            section,
            row,
        } => {
            let content = host
                .table_cell_content(table, *section, *row)
                .ok_or(TargetError::MissingCell {
                    section: *section,
                    row: *row,
                })?;
            Ok(ResolvedTarget {
                element: content,
                accent: None,
                holder_radius: Some(0.0),
            })
        }
        TargetRef::BarButtonItem(item) => {
            let first = host
                .bar_item_view(item)
                .and_then(|view| host.children(&view).into_iter().next())
                .ok_or(TargetError::UnrealizedBarItem)?;
            Ok(ResolvedTarget::new(first, None))
        }
    }
}

/// Interactive children of a tab bar, sorted by their left edge.
fn ordered_tab_items<H: ElementHost + ?Sized>(host: &H, tab_bar: &H::Element) -> Vec<H::Element> {
    let mut items: Vec<_> = host
        .children(tab_bar)
        .into_iter()
        .filter(|child| host.is_interactive(child))
        .map(|child| (host.frame(&child).min_x(), child))
        .collect();
    items.sort_by(|a, b| a.0.total_cmp(&b.0));
    items.into_iter().map(|(_, child)| child).collect()
}

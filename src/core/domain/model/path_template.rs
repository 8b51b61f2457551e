//! Path templates with named placeholders, e.g. `/nodes/{node}/qemu/{vmid}/config`.

use crate::core::domain::{
    error::ProxmoxResult,
    model::{
        request_body::GuestKind,
        work_item::ResolvedParams,
    },
};
use std::collections::BTreeSet;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Segment {
    Literal(&'static str),
    Param(&'static str),
}

/// A parsed path template relative to `/api2/json`.
///
/// A `?key=value&...` suffix is kept as fixed query pairs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathTemplate {
    raw: &'static str,
    segments: Vec<Segment>,
    query: Vec<(&'static str, &'static str)>,
}

impl PathTemplate {
    pub fn parse(raw: &'static str) -> Self {
        let (path, query) = raw.split_once('?').unwrap_or((raw, ""));
        let segments = path
            .split('/')
            .filter(|s| !s.is_empty())
            .map(|s| match s.strip_prefix('{').and_then(|s| s.strip_suffix('}')) {
                Some(name) => Segment::Param(name),
                None => Segment::Literal(s),
            })
            .collect();
        let query = query
            .split('&')
            .filter(|pair| !pair.is_empty())
            .map(|pair| pair.split_once('=').unwrap_or((pair, "")))
            .collect();
        Self {
            raw,
            segments,
            query,
        }
    }

    pub fn as_str(&self) -> &'static str {
        self.raw
    }

    /// Placeholder names, in path order.
    pub fn placeholders(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.segments.iter().filter_map(|s| match s {
            Segment::Param(name) => Some(*name),
            Segment::Literal(_) => None,
        })
    }

    /// Substitutes placeholders with values from `params`. Segments are returned
    /// raw; encoding happens when the URL is assembled.
    pub fn render(&self, params: &ResolvedParams) -> ProxmoxResult<RenderedPath> {
        let segments = self
            .segments
            .iter()
            .map(|segment| match segment {
                Segment::Literal(literal) => Ok((*literal).to_string()),
                Segment::Param(name) => params.segment(name),
            })
            .collect::<ProxmoxResult<Vec<_>>>()?;
        Ok(RenderedPath {
            segments,
            query: self.query.clone(),
        })
    }
}

/// The concrete path of one call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedPath {
    pub segments: Vec<String>,
    pub query: Vec<(&'static str, &'static str)>,
}

impl std::fmt::Display for RenderedPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for segment in &self.segments {
            write!(f, "/{}", segment)?;
        }
        for (i, (key, value)) in self.query.iter().enumerate() {
            write!(f, "{}{}={}", if i == 0 { '?' } else { '&' }, key, value)?;
        }
        Ok(())
    }
}

/// Where an operation is routed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathSpec {
    Fixed(PathTemplate),
    /// Route chosen per call by the guest kind named in the `selector` parameter.
    ByGuestKind {
        selector: &'static str,
        qemu: PathTemplate,
        lxc: PathTemplate,
    },
}

impl PathSpec {
    pub fn fixed(raw: &'static str) -> Self {
        PathSpec::Fixed(PathTemplate::parse(raw))
    }

    pub fn by_guest_kind(selector: &'static str, qemu: &'static str, lxc: &'static str) -> Self {
        PathSpec::ByGuestKind {
            selector,
            qemu: PathTemplate::parse(qemu),
            lxc: PathTemplate::parse(lxc),
        }
    }

    /// Every placeholder any route may use.
    pub fn placeholders(&self) -> BTreeSet<&'static str> {
        match self {
            PathSpec::Fixed(template) => template.placeholders().collect(),
            PathSpec::ByGuestKind { qemu, lxc, .. } => {
                qemu.placeholders().chain(lxc.placeholders()).collect()
            }
        }
    }

    pub fn render(&self, params: &ResolvedParams) -> ProxmoxResult<RenderedPath> {
        match self {
            PathSpec::Fixed(template) => template.render(params),
            PathSpec::ByGuestKind {
                selector,
                qemu,
                lxc,
            } => match GuestKind::from_param(params, selector)? {
                GuestKind::Qemu => qemu.render(params),
                GuestKind::Lxc => lxc.render(params),
            },
        }
    }
}

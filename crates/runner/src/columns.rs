//! Data-driven column model and expansion
//!
//! One, two, or three parallel value sequences ("columns") expand into
//! concrete cases by POSITIONAL pairing: tuple *i* is
//! `(first[i], second[i], third[i])`, never a cross product. Length
//! checks happen at declaration time in [`Description`], so every column
//! builder here holds sequences already known to agree.
//!
//! Each tuple is bound into its own case body and rendered into the case's
//! description template: `{}` placeholders are consumed left to right,
//! surplus values are appended at the end.

use crate::description::Description;
use crate::suite::SpecificationCase;
use smallvec::smallvec;
use specdrive_core::{Expect, ParamTuple};
use specdrive_generators::SourceGenerator;
use std::fmt::Debug;
use std::sync::Arc;

/// Render a tuple's values into a case description template
pub(crate) fn render_description(template: &str, params: &[String]) -> String {
    let mut out = String::with_capacity(template.len() + 16);
    let mut values = params.iter();
    let mut rest = template;
    while let Some(pos) = rest.find("{}") {
        out.push_str(&rest[..pos]);
        match values.next() {
            Some(value) => out.push_str(value),
            None => out.push_str("{}"),
        }
        rest = &rest[pos + 2..];
    }
    out.push_str(rest);
    for leftover in values {
        out.push(' ');
        out.push_str(leftover);
    }
    out
}

/// A single-column data-driven declaration awaiting its case body
pub struct Column<'d, T: Debug + Send + Sync + 'static> {
    description: &'d mut Description,
    values: Vec<T>,
}

impl<'d, T: Debug + Send + Sync + 'static> Column<'d, T> {
    pub(crate) fn new(description: &'d mut Description, values: Vec<T>) -> Self {
        Column {
            description,
            values,
        }
    }

    /// Bind `body` to every value, one expanded case per value
    pub fn to_show(self, template: &str, body: impl Fn(&Expect, &T) + Send + Sync + 'static) {
        let Column {
            description,
            values,
        } = self;
        let body = Arc::new(body);
        for value in values {
            let params: ParamTuple = smallvec![format!("{:?}", value)];
            let rendered = render_description(template, &params);
            let body = Arc::clone(&body);
            description.push_case(SpecificationCase {
                description: rendered,
                params,
                body: Box::new(move |expect| body(expect, &value)),
            });
        }
    }
}

/// A two-column data-driven declaration awaiting its case body
pub struct TwoColumns<'d, F, S>
where
    F: Debug + Send + Sync + 'static,
    S: Debug + Send + Sync + 'static,
{
    description: &'d mut Description,
    first: Vec<F>,
    second: Vec<S>,
}

impl<'d, F, S> TwoColumns<'d, F, S>
where
    F: Debug + Send + Sync + 'static,
    S: Debug + Send + Sync + 'static,
{
    // Callers have already verified the lengths agree
    pub(crate) fn new(description: &'d mut Description, first: Vec<F>, second: Vec<S>) -> Self {
        TwoColumns {
            description,
            first,
            second,
        }
    }

    /// Bind `body` to every positional pair
    pub fn to_show(self, template: &str, body: impl Fn(&Expect, &F, &S) + Send + Sync + 'static) {
        let TwoColumns {
            description,
            first,
            second,
        } = self;
        let body = Arc::new(body);
        for (f, s) in first.into_iter().zip(second) {
            let params: ParamTuple = smallvec![format!("{:?}", f), format!("{:?}", s)];
            let rendered = render_description(template, &params);
            let body = Arc::clone(&body);
            description.push_case(SpecificationCase {
                description: rendered,
                params,
                body: Box::new(move |expect| body(expect, &f, &s)),
            });
        }
    }
}

/// A three-column data-driven declaration awaiting its case body
pub struct ThreeColumns<'d, F, S, T>
where
    F: Debug + Send + Sync + 'static,
    S: Debug + Send + Sync + 'static,
    T: Debug + Send + Sync + 'static,
{
    description: &'d mut Description,
    first: Vec<F>,
    second: Vec<S>,
    third: Vec<T>,
}

impl<'d, F, S, T> ThreeColumns<'d, F, S, T>
where
    F: Debug + Send + Sync + 'static,
    S: Debug + Send + Sync + 'static,
    T: Debug + Send + Sync + 'static,
{
    pub(crate) fn new(
        description: &'d mut Description,
        first: Vec<F>,
        second: Vec<S>,
        third: Vec<T>,
    ) -> Self {
        ThreeColumns {
            description,
            first,
            second,
            third,
        }
    }

    /// Bind `body` to every positional triple
    pub fn to_show(
        self,
        template: &str,
        body: impl Fn(&Expect, &F, &S, &T) + Send + Sync + 'static,
    ) {
        let ThreeColumns {
            description,
            first,
            second,
            third,
        } = self;
        let body = Arc::new(body);
        for ((f, s), t) in first.into_iter().zip(second).zip(third) {
            let params: ParamTuple =
                smallvec![format!("{:?}", f), format!("{:?}", s), format!("{:?}", t)];
            let rendered = render_description(template, &params);
            let body = Arc::clone(&body);
            description.push_case(SpecificationCase {
                description: rendered,
                params,
                body: Box::new(move |expect| body(expect, &f, &s, &t)),
            });
        }
    }
}

/// A generated data-driven declaration: `count` tuples pulled eagerly from
/// a [`SourceGenerator`]
///
/// The source defaults to entropy seeding; override with
/// [`with_source`](GeneratedColumns::with_source) for a reproducible run.
pub struct GeneratedColumns<'d> {
    description: &'d mut Description,
    count: usize,
    source: SourceGenerator,
}

impl<'d> GeneratedColumns<'d> {
    pub(crate) fn new(description: &'d mut Description, count: usize) -> Self {
        GeneratedColumns {
            description,
            count,
            source: SourceGenerator::random_numbers(),
        }
    }

    /// Replace the value source, typically with a fixed-seed generator
    pub fn with_source(mut self, source: SourceGenerator) -> Self {
        self.source = source;
        self
    }

    /// The seed of the source this declaration will draw from
    ///
    /// Surfacing it lets a reporter name the seed that reproduces a
    /// failing generated case.
    pub fn seed(&self) -> u64 {
        self.source.seed()
    }

    /// Realize one generated column
    pub fn example<T>(mut self, generate: impl Fn(&mut SourceGenerator) -> T) -> Column<'d, T>
    where
        T: Debug + Send + Sync + 'static,
    {
        let values = (0..self.count).map(|_| generate(&mut self.source)).collect();
        Column::new(self.description, values)
    }

    /// Realize two generated columns, drawn alternately from one source
    pub fn example_two<F, S>(
        mut self,
        first: impl Fn(&mut SourceGenerator) -> F,
        second: impl Fn(&mut SourceGenerator) -> S,
    ) -> TwoColumns<'d, F, S>
    where
        F: Debug + Send + Sync + 'static,
        S: Debug + Send + Sync + 'static,
    {
        let mut firsts = Vec::with_capacity(self.count);
        let mut seconds = Vec::with_capacity(self.count);
        for _ in 0..self.count {
            firsts.push(first(&mut self.source));
            seconds.push(second(&mut self.source));
        }
        TwoColumns::new(self.description, firsts, seconds)
    }

    /// Realize three generated columns, drawn alternately from one source
    pub fn example_three<F, S, T>(
        mut self,
        first: impl Fn(&mut SourceGenerator) -> F,
        second: impl Fn(&mut SourceGenerator) -> S,
        third: impl Fn(&mut SourceGenerator) -> T,
    ) -> ThreeColumns<'d, F, S, T>
    where
        F: Debug + Send + Sync + 'static,
        S: Debug + Send + Sync + 'static,
        T: Debug + Send + Sync + 'static,
    {
        let mut firsts = Vec::with_capacity(self.count);
        let mut seconds = Vec::with_capacity(self.count);
        let mut thirds = Vec::with_capacity(self.count);
        for _ in 0..self.count {
            firsts.push(first(&mut self.source));
            seconds.push(second(&mut self.source));
            thirds.push(third(&mut self.source));
        }
        ThreeColumns::new(self.description, firsts, seconds, thirds)
    }
}

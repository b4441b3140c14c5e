/// Observer receiving the intermediate states of a hull computation.
///
/// Algorithms call the recorder on every meaningful mutation (stack push or pop, wrap step, merged sub-hull)
/// and once more with the final hull. The untraced path uses [`NoTrace`], so the algorithm itself stays the same
/// function whether a trace is requested or not.
pub trait Recorder<'a, T> {
    /// Records a working state. The state is open, recorders close it for display if they need to.
    fn record(&mut self, state: &[&'a T]);
    /// Records a boundary that is already closed (the final hull).
    fn record_closed(&mut self, hull: &[&'a T]);
}

/// Recorder that drops everything.
#[derive(Debug, Default, Copy, Clone)]
pub struct NoTrace;

impl<'a, T> Recorder<'a, T> for NoTrace {
    #[inline]
    fn record(&mut self, _: &[&'a T]) {}

    #[inline]
    fn record_closed(&mut self, _: &[&'a T]) {}
}

/// Ordered snapshots of a hull computation, meant for step by step replay.
///
/// The first snapshot is the input cloud and the last one is the returned hull.
#[derive(Debug, Clone, PartialEq)]
pub struct Trace<'a, T> {
    steps: Vec<Vec<&'a T>>,
}

impl<'a, T> Trace<'a, T> {
    pub fn new() -> Self {
        Trace { steps: Vec::new() }
    }

    pub fn steps(&self) -> &[Vec<&'a T>] {
        &self.steps
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn last(&self) -> Option<&Vec<&'a T>> {
        self.steps.last()
    }

    pub fn into_steps(self) -> Vec<Vec<&'a T>> {
        self.steps
    }
}

impl<'a, T> Default for Trace<'a, T> {
    fn default() -> Self {
        Trace::new()
    }
}

impl<'a, T> Recorder<'a, T> for Trace<'a, T> {
    fn record(&mut self, state: &[&'a T]) {
        let mut step = Vec::with_capacity(state.len() + 1);
        step.extend_from_slice(state);
        // closed ad hoc, the live state stays open
        if state.len() > 1 {
            step.push(state[0]);
        }
        self.steps.push(step);
    }

    fn record_closed(&mut self, hull: &[&'a T]) {
        self.steps.push(hull.to_vec());
    }
}

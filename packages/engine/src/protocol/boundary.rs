//! The execution boundary: sole owner of the kernel state
//!
//! Commands are handled strictly in arrival order. `handle` processes one
//! command immediately; `post` + `pump` queue commands and drain them in
//! order, so a `step` sent while another is being processed waits its turn.

use std::collections::VecDeque;

use super::messages::{Command, Response};
use crate::core::{rng, KernelError, KernelResult, KernelRng};
use crate::simulation::SimulationCore;
use crate::systems::{Interpreter, NullInterpreter};

pub type RngFactory = Box<dyn Fn(u64) -> KernelRng + Send>;
pub type InterpreterFactory = Box<dyn Fn() -> Box<dyn Interpreter> + Send>;

pub struct ExecutionBoundary {
    core: Option<SimulationCore>,
    queue: VecDeque<Command>,
    rng_factory: RngFactory,
    interpreter_factory: InterpreterFactory,
}

impl Default for ExecutionBoundary {
    fn default() -> Self {
        Self::new()
    }
}

impl ExecutionBoundary {
    pub fn new() -> Self {
        Self {
            core: None,
            queue: VecDeque::new(),
            rng_factory: Box::new(rng::seeded),
            interpreter_factory: Box::new(|| Box::new(NullInterpreter) as Box<dyn Interpreter>),
        }
    }

    /// Generator built for every `init`, from the configured seed
    pub fn with_rng_factory<F>(mut self, factory: F) -> Self
    where
        F: Fn(u64) -> KernelRng + Send + 'static,
    {
        self.rng_factory = Box::new(factory);
        self
    }

    /// Interpreter installed into every kernel this boundary creates
    pub fn with_interpreter_factory<F>(mut self, factory: F) -> Self
    where
        F: Fn() -> Box<dyn Interpreter> + Send + 'static,
    {
        self.interpreter_factory = Box::new(factory);
        self
    }

    pub fn core(&self) -> Option<&SimulationCore> {
        self.core.as_ref()
    }

    pub fn is_initialized(&self) -> bool {
        self.core.is_some()
    }

    /// Process one command now. Failures become `error` responses and leave
    /// the kernel as it was before the command.
    pub fn handle(&mut self, command: Command) -> Option<Response> {
        let kind = command.kind();
        match self.dispatch(command) {
            Ok(response) => response,
            Err(err) => {
                log::warn!("{} rejected: {}", kind, err);
                Some(Response::from(&err))
            }
        }
    }

    /// Queue a command for the next `pump`
    pub fn post(&mut self, command: Command) {
        self.queue.push_back(command);
    }

    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    /// Drain the queue in order, collecting responses
    pub fn pump(&mut self) -> Vec<Response> {
        let mut out = Vec::with_capacity(self.queue.len());
        while let Some(command) = self.queue.pop_front() {
            if let Some(response) = self.handle(command) {
                out.push(response);
            }
        }
        out
    }

    fn core_mut(&mut self) -> KernelResult<&mut SimulationCore> {
        self.core.as_mut().ok_or(KernelError::NotInitialized)
    }

    fn dispatch(&mut self, command: Command) -> KernelResult<Option<Response>> {
        match command {
            Command::Init(config) => {
                let mut core = SimulationCore::with_rng(&config, (self.rng_factory)(config.seed))?;
                core.set_interpreter((self.interpreter_factory)());
                let response = Response::Ready {
                    width: core.width(),
                    height: core.height(),
                };
                self.core = Some(core);
                Ok(Some(response))
            }
            Command::RegisterMaterial { material } => {
                let core = self.core_mut()?;
                let id = core.register_material(material)?;
                let name = core.registry().material(id).name.clone();
                Ok(Some(Response::MaterialRegistered { id, name }))
            }
            Command::ReplaceGrid { grid } => {
                let core = self.core_mut()?;
                core.replace_grid(grid)?;
                Ok(Some(Response::GridReplaced {
                    grid: None,
                    width: core.width(),
                    height: core.height(),
                }))
            }
            Command::PaintCells {
                material,
                cells,
                echo,
            } => {
                let core = self.core_mut()?;
                core.paint_cells(material, &cells)?;
                Ok(echo.then(|| echo_grid(core)))
            }
            Command::PaintCircle {
                material,
                cx,
                cy,
                radius,
                echo,
            } => {
                let core = self.core_mut()?;
                core.paint_circle(material, cx, cy, radius)?;
                Ok(echo.then(|| echo_grid(core)))
            }
            Command::Clear => {
                let core = self.core_mut()?;
                core.clear();
                Ok(Some(echo_grid(core)))
            }
            Command::Step => {
                let core = self.core_mut()?;
                core.step()?;
                Ok(Some(Response::Stepped {
                    width: core.width(),
                    height: core.height(),
                    frame: core.frame(),
                    grid: core.export_grid(),
                }))
            }
            Command::GetGrid => {
                let core = self.core_mut()?;
                Ok(Some(Response::Grid {
                    width: core.width(),
                    height: core.height(),
                    grid: core.export_grid(),
                }))
            }
            Command::GetMaterials => {
                let core = self.core_mut()?;
                Ok(Some(Response::Materials {
                    materials: core.registry().manifest(),
                }))
            }
            Command::GetStats => {
                let core = self.core_mut()?;
                Ok(Some(Response::Stats {
                    stats: core.perf_stats(),
                }))
            }
        }
    }
}

fn echo_grid(core: &mut SimulationCore) -> Response {
    Response::GridReplaced {
        width: core.width(),
        height: core.height(),
        grid: Some(core.export_grid()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::MaterialDefinition;
    use crate::simulation::KernelConfig;
    use rand::rngs::mock::StepRng;

    fn boundary() -> ExecutionBoundary {
        ExecutionBoundary::new().with_rng_factory(|_| Box::new(StepRng::new(0, 0)))
    }

    #[test]
    fn commands_before_init_are_rejected() {
        let mut b = boundary();
        let resp = b.handle(Command::Step).unwrap();
        assert_eq!(
            resp,
            Response::Error {
                kind: "not_initialized".to_string(),
                message: KernelError::NotInitialized.to_string(),
            }
        );
    }

    #[test]
    fn init_then_step_returns_the_grid() {
        let mut b = boundary();
        assert_eq!(
            b.handle(Command::Init(KernelConfig::new(2, 2))),
            Some(Response::Ready { width: 2, height: 2 })
        );
        let resp = b.handle(Command::Step).unwrap();
        assert_eq!(
            resp,
            Response::Stepped { grid: vec![0; 4], width: 2, height: 2, frame: 1 }
        );
    }

    #[test]
    fn failed_reinit_keeps_the_running_kernel() {
        let mut b = boundary();
        b.handle(Command::Init(KernelConfig::new(2, 2)));
        let resp = b.handle(Command::Init(KernelConfig::new(0, 2))).unwrap();
        assert_eq!(resp.kind(), "error");
        assert_eq!(b.core().map(|c| c.width()), Some(2));
    }

    #[test]
    fn reinit_recreates_the_registry() {
        let mut b = boundary();
        b.handle(Command::Init(KernelConfig::new(2, 2)));
        b.handle(Command::RegisterMaterial { material: MaterialDefinition::new("Sand") });
        b.handle(Command::Init(KernelConfig::new(3, 3)));
        assert_eq!(b.core().map(|c| c.registry().len()), Some(1));
    }

    #[test]
    fn silent_paint_sends_nothing() {
        let mut b = boundary();
        b.handle(Command::Init(KernelConfig::new(2, 2)));
        b.handle(Command::RegisterMaterial { material: MaterialDefinition::new("Sand") });
        let resp = b.handle(Command::PaintCells { material: 1, cells: vec![(0, 0)], echo: false });
        assert!(resp.is_none());
        let echoed = b
            .handle(Command::PaintCells { material: 1, cells: vec![(1, 1)], echo: true })
            .unwrap();
        assert_eq!(echoed.grid(), Some(&[1, 0, 0, 1][..]));
    }

    #[test]
    fn queued_commands_run_in_order() {
        let mut b = boundary();
        b.post(Command::Init(KernelConfig::new(1, 2)));
        b.post(Command::RegisterMaterial {
            material: MaterialDefinition::new("Sand").with_tags(&["sand"]),
        });
        b.post(Command::PaintCells { material: 1, cells: vec![(0, 0)], echo: false });
        b.post(Command::Step);
        b.post(Command::Step);
        assert_eq!(b.pending(), 5);

        let out = b.pump();
        assert_eq!(b.pending(), 0);
        let kinds: Vec<&str> = out.iter().map(Response::kind).collect();
        assert_eq!(kinds, vec!["ready", "material_registered", "stepped", "stepped"]);
        assert_eq!(out[2].grid(), Some(&[0, 1][..]));
        assert_eq!(out[3].grid(), Some(&[0, 1][..]));
    }
}

//! # Pool de Workers
//! src/server/pool.rs
//!
//! Un número fijo de threads consume tareas de una cola FIFO compartida.
//! El thread que acepta conexiones sólo encola; nunca espera a un worker.

use std::collections::VecDeque;
use std::io;
use std::panic::{self, AssertUnwindSafe};
use std::sync::{Arc, Condvar, Mutex, MutexGuard, PoisonError};
use std::thread::{self, JoinHandle};

use tracing::{debug, error};

/// Tarea que ejecuta un worker
type Task = Box<dyn FnOnce() + Send + 'static>;

struct QueueState {
    tasks: VecDeque<Task>,
    closed: bool,
}

/// Cola FIFO thread-safe sin límite de capacidad
#[derive(Clone)]
struct TaskQueue {
    state: Arc<Mutex<QueueState>>,

    /// Condvar para notificar cuando hay nuevas tareas o se cierra la cola
    condvar: Arc<Condvar>,
}

impl TaskQueue {
    fn new() -> Self {
        Self {
            state: Arc::new(Mutex::new(QueueState {
                tasks: VecDeque::new(),
                closed: false,
            })),
            condvar: Arc::new(Condvar::new()),
        }
    }

    fn lock(&self) -> MutexGuard<'_, QueueState> {
        // Las tareas corren fuera del lock; un panic no puede dejar el estado a medias
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Encola una tarea; retorna false si la cola ya está cerrada
    fn push(&self, task: Task) -> bool {
        let mut state = self.lock();
        if state.closed {
            return false;
        }
        state.tasks.push_back(task);

        // Notificar a un worker esperando
        self.condvar.notify_one();
        true
    }

    /// Bloquea hasta que haya una tarea
    ///
    /// Retorna None cuando la cola está cerrada y vacía.
    fn pop(&self) -> Option<Task> {
        let mut state = self.lock();

        loop {
            if let Some(task) = state.tasks.pop_front() {
                return Some(task);
            }
            if state.closed {
                return None;
            }
            state = self
                .condvar
                .wait(state)
                .unwrap_or_else(PoisonError::into_inner);
        }
    }

    fn close(&self) {
        self.lock().closed = true;
        self.condvar.notify_all();
    }

    fn len(&self) -> usize {
        self.lock().tasks.len()
    }
}

/// Pool de tamaño fijo
///
/// Al destruirse cierra la cola: los workers terminan las tareas pendientes
/// y salen, sin que el dueño los espere. `join` sí espera.
pub struct WorkerPool {
    queue: TaskQueue,
    workers: Vec<JoinHandle<()>>,
}

impl WorkerPool {
    /// Lanza `size` workers (al menos uno)
    pub fn new(size: usize) -> io::Result<Self> {
        let queue = TaskQueue::new();
        let size = size.max(1);
        let mut workers = Vec::with_capacity(size);

        for i in 0..size {
            let name = format!("worker-{}", i);
            let worker_queue = queue.clone();
            let handle = thread::Builder::new()
                .name(name.clone())
                .spawn(move || worker_loop(name, worker_queue));

            match handle {
                Ok(handle) => workers.push(handle),
                Err(e) => {
                    // Los workers ya lanzados salen al cerrar la cola
                    queue.close();
                    return Err(e);
                }
            }
        }

        debug!(workers = size, "Pool de workers iniciado");
        Ok(Self { queue, workers })
    }

    /// Encola una tarea para el próximo worker libre
    pub fn dispatch<F>(&self, task: F)
    where
        F: FnOnce() + Send + 'static,
    {
        // La cola sólo se cierra en drop/join, que consumen el pool
        let _ = self.queue.push(Box::new(task));
    }

    pub fn size(&self) -> usize {
        self.workers.len()
    }

    /// Tareas encoladas que ningún worker ha tomado todavía
    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    /// Cierra la cola y espera a que los workers terminen lo pendiente
    pub fn join(mut self) {
        self.queue.close();
        for handle in self.workers.drain(..) {
            let _ = handle.join();
        }
    }
}

impl Drop for WorkerPool {
    fn drop(&mut self) {
        self.queue.close();
    }
}

/// Loop principal del worker
fn worker_loop(name: String, queue: TaskQueue) {
    debug!(worker = %name, "Worker iniciado");

    while let Some(task) = queue.pop() {
        if panic::catch_unwind(AssertUnwindSafe(task)).is_err() {
            error!(worker = %name, "La tarea terminó con panic");
        }
    }

    debug!(worker = %name, "Worker terminado");
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    #[test]
    fn test_runs_every_task() {
        let pool = WorkerPool::new(4).unwrap();
        let counter = Arc::new(AtomicUsize::new(0));

        for _ in 0..100 {
            let counter = Arc::clone(&counter);
            pool.dispatch(move || {
                counter.fetch_add(1, Ordering::SeqCst);
            });
        }
        pool.join();

        assert_eq!(counter.load(Ordering::SeqCst), 100);
    }

    #[test]
    fn test_single_worker_is_fifo() {
        let pool = WorkerPool::new(1).unwrap();
        let order = Arc::new(Mutex::new(Vec::new()));

        for i in 0..10 {
            let order = Arc::clone(&order);
            pool.dispatch(move || order.lock().unwrap().push(i));
        }
        pool.join();

        assert_eq!(*order.lock().unwrap(), (0..10).collect::<Vec<_>>());
    }

    #[test]
    fn test_concurrency_bounded_by_size() {
        let pool = WorkerPool::new(2).unwrap();
        let active = Arc::new(AtomicUsize::new(0));
        let peak = Arc::new(AtomicUsize::new(0));

        for _ in 0..8 {
            let active = Arc::clone(&active);
            let peak = Arc::clone(&peak);
            pool.dispatch(move || {
                let now = active.fetch_add(1, Ordering::SeqCst) + 1;
                peak.fetch_max(now, Ordering::SeqCst);
                thread::sleep(Duration::from_millis(20));
                active.fetch_sub(1, Ordering::SeqCst);
            });
        }
        pool.join();

        let peak = peak.load(Ordering::SeqCst);
        assert!(peak >= 1 && peak <= 2, "peak = {}", peak);
    }

    #[test]
    fn test_panic_does_not_kill_worker() {
        let pool = WorkerPool::new(1).unwrap();
        let counter = Arc::new(AtomicUsize::new(0));

        pool.dispatch(|| panic!("tarea rota"));
        let after = Arc::clone(&counter);
        pool.dispatch(move || {
            after.fetch_add(1, Ordering::SeqCst);
        });
        pool.join();

        assert_eq!(counter.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_zero_size_gets_one_worker() {
        let pool = WorkerPool::new(0).unwrap();
        assert_eq!(pool.size(), 1);
        assert_eq!(pool.pending(), 0);
    }
}

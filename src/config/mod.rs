pub mod persona;

pub use persona::{ Persona, PersonaError, load_persona, resolve_persona };

mod contracts;
mod services;

use autoreg::Registrations;

include!(concat!(env!("OUT_DIR"), "/registrations.rs"));

fn main() {
    let mut registrations = Registrations::new();
    register_services(&mut registrations);

    for registration in &registrations {
        if registration.is_self() {
            println!("{} ({})", registration.implementation.name, registration.lifetime.name());
        } else {
            println!(
                "{} -> {} ({})",
                registration.contract.name,
                registration.implementation.name,
                registration.lifetime.name()
            );
        }
    }
}

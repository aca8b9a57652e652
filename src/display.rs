use crate::funds::Distribution;
use crate::registers::Register;

pub fn display_registers(registers: &[Register], details: bool) {
    for register in registers {
        println!(
            "{}: {} voters (deadline {}, first election day {})",
            register.title,
            register.entries.len(),
            register.deadline,
            register.first_election_day
        );
        if details {
            for (i, entry) in register.entries.iter().enumerate() {
                println!("  {:>5}. {} ({})", i + 1, entry.name, entry.matriculation_number);
            }
            if let Some(programs) = register.programs.as_ref().filter(|p| !p.is_empty()) {
                println!("  Programs considered ({}):", programs.len());
                for p in programs {
                    println!("    - {} / {}", p.degree, p.subject);
                }
            }
            println!();
        }
    }
}

fn distribution_heading(distribution: &Distribution) -> String {
    format!("Funds distribution ({} total shares):", distribution.total())
}

pub fn display_distribution(distribution: &Distribution) {
    println!("{}", distribution_heading(distribution));
    for (group, share) in distribution.iter() {
        println!("  - {group}: {share}");
    }
}

pub fn display_unmapped(unmapped: &[String]) {
    if !unmapped.is_empty() {
        println!("Programs without group:");
        for program in unmapped {
            println!("  - {program}");
        }
    }
}

pub fn display_empty(registers: &[Register]) {
    let mut empty = registers
        .iter()
        .filter(|r| r.entries.is_empty())
        .map(|r| r.title.as_str())
        .collect::<Vec<_>>();
    empty.sort_unstable();
    if !empty.is_empty() {
        println!("Empty registers:");
        for title in empty {
            println!("  - {title}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use num_bigint::BigInt;
    use num_rational::BigRational;

    #[test]
    fn test_distribution_heading() {
        let mut distribution = Distribution::new();
        distribution.add("Geschichte", BigRational::new(BigInt::from(1), BigInt::from(2)));
        distribution.add("Zauberei", BigRational::new(BigInt::from(1), BigInt::from(2)));
        assert_eq!(
            distribution_heading(&distribution),
            "Funds distribution (1 total shares):"
        );
    }
}

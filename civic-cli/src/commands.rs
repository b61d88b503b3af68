//! Subcommand handlers

use anyhow::{Context, Result};
use chrono::{Datelike, Local};
use civic_client::{CivicClient, ComplaintDraft, ImageAttachment};
use shared::filter::{ComplaintQuery, unassigned};
use shared::models::{Complaint, ComplaintUpdate};
use shared::stats::{category_breakdown, department_breakdown, monthly_breakdown};

use crate::cli::Command;

pub async fn run(client: &CivicClient, command: Command) -> Result<()> {
    match command {
        Command::Login { email, password } => {
            let user = client.login(&email, &password).await?;
            println!("Welcome {} ({})", user.display_name(), user.role);
        }
        Command::Logout => {
            client.logout()?;
            println!("Logged out.");
        }
        Command::Whoami => match client.session().current_user() {
            Some(user) => {
                println!("{} <{}>", user.display_name(), user.email.as_deref().unwrap_or("-"));
                println!("role: {}", user.role);
            }
            None => println!("Not logged in."),
        },
        Command::Register {
            username,
            email,
            password,
            confirm,
        } => {
            let registered = client.register(&username, &email, &password, &confirm).await?;
            println!(
                "Account created for {}. Please sign in to continue.",
                registered.email
            );
        }
        Command::List {
            search,
            status,
            category,
            unassigned: only_unassigned,
        } => {
            client.store().fetch_all().await?;
            let query = ComplaintQuery {
                text: search,
                status,
                category,
            };
            let mut complaints = client.store().filtered(&query);
            if only_unassigned {
                complaints = unassigned(&complaints);
            }
            print_list(&complaints);
        }
        Command::Show { id } => {
            let complaint = client
                .store()
                .get_by_id(id)
                .await
                .with_context(|| "The complaint does not exist or you do not have access.")?;
            print_complaint(&complaint);
            let timeline = client.timeline(id).await?;
            print_timeline(&timeline);
        }
        Command::Stats { year } => {
            client.store().fetch_all().await?;
            print_stats(client, year.unwrap_or_else(|| Local::now().year()));
        }
        Command::Submit {
            title,
            category,
            description,
            location,
            priority,
            images,
        } => {
            let mut draft = ComplaintDraft::new(title, category, description, location, priority);
            for path in images {
                let image = ImageAttachment::from_path(&path)
                    .await
                    .with_context(|| format!("Cannot read image {}", path.display()))?;
                draft = draft.with_image(image);
            }
            let created = client.store().add(&draft).await?;
            println!("Complaint #{} registered successfully.", created.id);
        }
        Command::Assign { id, department } => {
            client.assign_department(id, department).await?;
            println!("Complaint #{id} assigned to department {department}.");
        }
        Command::Status {
            id,
            status,
            message,
        } => {
            client.transition_status(id, status, &message).await?;
            println!("Complaint #{id} is now {}.", status.label());
        }
        Command::Feedback {
            id,
            rating,
            comment,
        } => {
            client.submit_feedback(id, rating, &comment).await?;
            println!("Thank you for your feedback!");
        }
        Command::Departments => {
            for department in client.departments().await? {
                println!("{:>5}  {}  <{}>", department.id, department.label(), department.email);
            }
        }
        Command::Notifications { mark_read } => {
            let notifications = client.notifications().await?;
            if notifications.is_empty() {
                println!("No notifications.");
            }
            for n in &notifications {
                let marker = if n.read { ' ' } else { '*' };
                println!(
                    "{marker} {}  {}",
                    n.created_at.with_timezone(&Local).format("%Y-%m-%d %H:%M"),
                    n.message
                );
            }
            if mark_read {
                client.mark_notifications_read().await?;
                println!("All notifications marked as read.");
            }
        }
        Command::Profile { name, email } => {
            let user = client.update_profile(&name, &email).await?;
            println!("Profile updated successfully! ({})", user.display_name());
        }
        Command::Password {
            current,
            new,
            confirm,
        } => {
            client.change_password(&current, &new, &confirm).await?;
            println!("Password changed successfully!");
        }
    }
    Ok(())
}

fn or_dash(value: Option<&str>) -> &str {
    value.filter(|v| !v.is_empty()).unwrap_or("-")
}

fn print_list(complaints: &[Complaint]) {
    if complaints.is_empty() {
        println!("No complaints found.");
        return;
    }
    println!(
        "{:>5}  {:<12}  {:<13}  {:<8}  {:<16}  TITLE",
        "ID", "STATUS", "CATEGORY", "PRIORITY", "DEPARTMENT"
    );
    for c in complaints {
        println!(
            "{:>5}  {:<12}  {:<13}  {:<8}  {:<16}  {}",
            c.id,
            or_dash(c.status.as_deref()),
            or_dash(c.category.as_deref()),
            or_dash(c.priority.as_deref()),
            c.department_label(),
            c.title
        );
    }
}

fn print_complaint(c: &Complaint) {
    println!("#{} {}", c.id, c.title);
    println!("  status:     {}", c.status_kind().map_or("-", |s| s.label()));
    println!("  category:   {}", c.category_kind().map_or("-", |s| s.label()));
    println!("  priority:   {}", c.priority_kind().map_or("-", |s| s.label()));
    println!("  location:   {}", c.location);
    println!("  department: {}", c.department_label());
    println!("  filed by:   {}", or_dash(c.citizen_name.as_deref()));
    println!(
        "  filed at:   {}",
        c.created_at.with_timezone(&Local).format("%Y-%m-%d %H:%M")
    );
    println!();
    println!("{}", c.description);
    for image in &c.images {
        println!("  [image {}] {}", image.id, or_dash(image.uri.as_deref()));
    }
    if let Some(feedback) = &c.feedback {
        println!();
        println!(
            "Feedback: {}/5 {}",
            feedback.rating,
            feedback.comment.as_deref().unwrap_or("")
        );
    }
}

fn print_timeline(timeline: &[ComplaintUpdate]) {
    println!();
    if timeline.is_empty() {
        println!("No updates yet.");
        return;
    }
    println!("Timeline:");
    for u in timeline {
        let status = u.status_kind().map_or("", |s| s.label());
        println!(
            "  {}  {:<12}  {}: {}",
            u.created_at.with_timezone(&Local).format("%Y-%m-%d %H:%M"),
            status,
            u.actor(),
            u.message
        );
    }
}

fn print_stats(client: &CivicClient, year: i32) {
    let stats = client.store().stats();
    println!("Total:       {}", stats.total);
    println!("Pending:     {}", stats.pending);
    println!("In progress: {}", stats.in_progress);
    println!("Resolved:    {}", stats.resolved);

    let complaints = client.store().complaints();
    println!();
    println!("By category:");
    for row in category_breakdown(&complaints) {
        println!("  {:<14} {}", row.category.label(), row.count);
    }
    println!();
    println!("By department:");
    for row in department_breakdown(&complaints) {
        println!("  {:<16} {}", row.name, row.count);
    }
    println!();
    println!("{year} by month (filed / resolved):");
    for row in monthly_breakdown(&complaints, year) {
        println!("  {:>2}  {:>4} / {}", row.month, row.complaints, row.resolved);
    }
}
